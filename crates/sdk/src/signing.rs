// Copyright 2025 chenjjiaa
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Request signing
//!
//! Every request sent to the Panda API carries four authentication parameters
//! next to its regular parameters: `cloud_id`, `access_key`, `timestamp` and
//! `signature`. The signature is computed as follows:
//!
//! 1. Default `cloud_id`, `access_key` and `timestamp` from the bound credentials
//! 2. Drop the `file` upload marker
//! 3. Sort the remaining parameters by key and form-encode them, then turn `+`
//!    into `%20` and `%5B`/`%5D` back into literal brackets (canonical query string)
//! 4. Join `METHOD`, host, path and the canonical query string with `\n`
//! 5. HMAC-SHA256 the result with the secret key and base64-encode the raw digest

use std::{collections::BTreeMap, fmt};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use crate::config::ConfigError;

type HmacSha256 = Hmac<Sha256>;

/// Request parameters, kept in key order
pub type Params = BTreeMap<String, String>;

pub const CLOUD_ID_PARAM: &str = "cloud_id";
pub const ACCESS_KEY_PARAM: &str = "access_key";
pub const TIMESTAMP_PARAM: &str = "timestamp";
pub const SIGNATURE_PARAM: &str = "signature";

/// Multipart upload marker, never part of the signed string
pub const FILE_PARAM: &str = "file";

/// Account credentials used to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	access_key: String,
	secret_key: String,
	api_host: String,
}

impl Credentials {
	/// Create credentials for the given access key, secret key and API host
	///
	/// `api_host` is a bare host name such as `api.pandastream.com`.
	pub fn new(
		access_key: impl Into<String>,
		secret_key: impl Into<String>,
		api_host: impl Into<String>,
	) -> Self {
		Self {
			access_key: access_key.into(),
			secret_key: secret_key.into(),
			api_host: api_host.into(),
		}
	}

	pub fn access_key(&self) -> &str {
		&self.access_key
	}

	pub fn api_host(&self) -> &str {
		&self.api_host
	}

	/// Check that no credential is blank
	///
	/// Signing itself never validates; call this before building a [`Signer`]
	/// so that a misconfigured account fails at setup time.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.access_key.trim().is_empty() {
			return Err(ConfigError::MissingCredential("access_key"));
		}
		if self.secret_key.trim().is_empty() {
			return Err(ConfigError::MissingCredential("secret_key"));
		}
		if self.api_host.trim().is_empty() {
			return Err(ConfigError::MissingCredential("api_host"));
		}
		Ok(())
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("access_key", &self.access_key)
			.field("secret_key", &"<redacted>")
			.field("api_host", &self.api_host)
			.finish()
	}
}

/// Signs request parameters for one cloud
///
/// A `Signer` is an immutable value: it can be cloned freely and shared across
/// threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
	credentials: Credentials,
	cloud_id: String,
}

impl Signer {
	pub fn new(credentials: Credentials, cloud_id: impl Into<String>) -> Self {
		Self {
			credentials,
			cloud_id: cloud_id.into(),
		}
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub fn cloud_id(&self) -> &str {
		&self.cloud_id
	}

	/// Add `cloud_id`, `access_key`, `timestamp` and `signature` to `params`
	///
	/// Values already present in `params` are kept, so callers may pin the
	/// timestamp (or target another cloud) explicitly.
	pub fn sign(&self, method: &str, path: &str, params: Params) -> Params {
		let mut params = self.with_defaults(params);
		let signature = self.signature(method, path, &params);
		params.insert(SIGNATURE_PARAM.to_string(), signature);
		params
	}

	/// Compute the signature `sign` would embed, without touching `params`
	pub fn signature(&self, method: &str, path: &str, params: &Params) -> String {
		let params = self.with_defaults(params.clone());
		let canonical = canonical_query_string(&params);
		let message = string_to_sign(method, &self.credentials.api_host, path, &canonical);

		let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.as_bytes())
			.expect("HMAC can take key of any size");
		mac.update(message.as_bytes());
		STANDARD.encode(mac.finalize().into_bytes())
	}

	fn with_defaults(&self, mut params: Params) -> Params {
		params
			.entry(CLOUD_ID_PARAM.to_string())
			.or_insert_with(|| self.cloud_id.clone());
		params
			.entry(ACCESS_KEY_PARAM.to_string())
			.or_insert_with(|| self.credentials.access_key.clone());
		params
			.entry(TIMESTAMP_PARAM.to_string())
			.or_insert_with(utc_timestamp);
		params
	}
}

/// Build the canonical query string for `params`
///
/// The `file` marker is skipped. Spaces come out as `%20`, `*` as `%2A` and
/// array brackets stay literal (`events[video_created]=true`), matching PHP
/// `urlencode` byte for byte.
pub fn canonical_query_string(params: &Params) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in params.iter().filter(|(key, _)| key.as_str() != FILE_PARAM) {
		serializer.append_pair(key, value);
	}

	serializer
		.finish()
		.replace('+', "%20")
		.replace('*', "%2A")
		.replace("%5B", "[")
		.replace("%5D", "]")
}

/// Join method, host, path and canonical query string into the signed message
pub fn string_to_sign(method: &str, host: &str, path: &str, canonical_query: &str) -> String {
	format!(
		"{}\n{}\n{}\n{}",
		method.to_uppercase(),
		host,
		path,
		canonical_query
	)
}

/// Current UTC time, e.g. `2011-03-01T15:39:10+00:00`
pub fn utc_timestamp() -> String {
	Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}
