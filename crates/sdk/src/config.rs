// Copyright 2025 itscheems
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

//! Account and cloud configuration
//!
//! A configuration names any number of accounts (credential sets) and clouds
//! (a cloud id plus the account it belongs to). One cloud is the default.
//!
//! ```toml
//! default_cloud = "production"
//!
//! [accounts.main]
//! access_key = "abcdefgh"
//! secret_key = "ijklmnop"
//! api_host = "api.pandastream.com"
//!
//! [clouds.production]
//! id = "123456789"
//! account = "main"
//! ```
//!
//! Environment variables with the `PANDA` prefix and `__` separator override
//! file values, e.g. `PANDA__ACCOUNTS__MAIN__SECRET_KEY`.

use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signing::{Credentials, Signer};

/// Default API host
pub const DEFAULT_API_HOST: &str = "api.pandastream.com";

/// Default API port; 443 selects https
pub const DEFAULT_API_PORT: u16 = 443;

/// API version prefix for every request path
pub const API_VERSION: &str = "v2";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PANDA";

/// Error types for configuration
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Failed to load configuration: {0}")]
	Load(#[from] config::ConfigError),
	#[error("Missing credential: {0}")]
	MissingCredential(&'static str),
	#[error("Missing field `{field}` in {kind} `{name}`")]
	MissingField {
		kind: &'static str,
		name: String,
		field: &'static str,
	},
	#[error("Cloud `{cloud}` references unknown account `{account}`")]
	UnknownAccount { cloud: String, account: String },
	#[error("Unknown cloud: {0}")]
	UnknownCloud(String),
	#[error("No cloud name given and no default cloud configured")]
	NoDefaultCloud,
}

/// One set of account credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
	#[serde(default)]
	pub access_key: String,
	#[serde(default)]
	pub secret_key: String,
	#[serde(default = "default_api_host")]
	pub api_host: String,
}

/// A cloud and the account that owns it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloudConfig {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub account: String,
}

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PandaConfig {
	#[serde(default)]
	pub accounts: HashMap<String, AccountConfig>,
	#[serde(default)]
	pub clouds: HashMap<String, CloudConfig>,
	/// Cloud used when no name is given
	#[serde(default)]
	pub default_cloud: Option<String>,
	#[serde(default = "default_api_port")]
	pub api_port: u16,
	#[serde(default = "default_timeout_secs")]
	pub timeout_secs: u64,
}

impl Default for PandaConfig {
	fn default() -> Self {
		Self {
			accounts: HashMap::new(),
			clouds: HashMap::new(),
			default_cloud: None,
			api_port: DEFAULT_API_PORT,
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}
}

fn default_api_host() -> String {
	DEFAULT_API_HOST.to_string()
}

fn default_api_port() -> u16 {
	DEFAULT_API_PORT
}

fn default_timeout_secs() -> u64 {
	DEFAULT_TIMEOUT_SECS
}

/// A resolved cloud, ready to sign requests
#[derive(Debug, Clone)]
pub struct CloudBinding {
	pub name: String,
	pub signer: Signer,
}

impl PandaConfig {
	/// Load configuration from environment variables
	pub fn from_env() -> Result<Self, ConfigError> {
		let cfg = config::Config::builder()
			.add_source(environment())
			.build()?;

		Self::finish(cfg)
	}

	/// Load configuration from file, with environment overrides
	///
	/// The format is picked from the file extension (toml, yaml, json, ...).
	pub fn from_file(path: &str) -> Result<Self, ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::File::with_name(path))
			.add_source(environment())
			.build()?;

		Self::finish(cfg)
	}

	/// Parse configuration from an inline TOML document
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::File::from_str(content, config::FileFormat::Toml))
			.build()?;

		Self::finish(cfg)
	}

	fn finish(cfg: config::Config) -> Result<Self, ConfigError> {
		let parsed: Self = cfg.try_deserialize()?;
		parsed.validate()?;
		Ok(parsed)
	}

	/// Check every account and cloud record
	pub fn validate(&self) -> Result<(), ConfigError> {
		for (name, account) in &self.accounts {
			let missing = [
				("access_key", &account.access_key),
				("secret_key", &account.secret_key),
				("api_host", &account.api_host),
			]
			.into_iter()
			.find(|(_, value)| value.trim().is_empty());

			if let Some((field, _)) = missing {
				return Err(ConfigError::MissingField {
					kind: "account",
					name: name.clone(),
					field,
				});
			}
		}

		for (name, cloud) in &self.clouds {
			if cloud.id.trim().is_empty() {
				return Err(ConfigError::MissingField {
					kind: "cloud",
					name: name.clone(),
					field: "id",
				});
			}
			if cloud.account.trim().is_empty() {
				return Err(ConfigError::MissingField {
					kind: "cloud",
					name: name.clone(),
					field: "account",
				});
			}
			if !self.accounts.contains_key(&cloud.account) {
				return Err(ConfigError::UnknownAccount {
					cloud: name.clone(),
					account: cloud.account.clone(),
				});
			}
		}

		if let Some(default) = &self.default_cloud
			&& !self.clouds.contains_key(default)
		{
			return Err(ConfigError::UnknownCloud(default.clone()));
		}

		Ok(())
	}

	/// Resolve a cloud by name, or the default cloud when `name` is `None`
	///
	/// With a single configured cloud and no explicit default, that cloud is used.
	pub fn resolve_cloud(&self, name: Option<&str>) -> Result<CloudBinding, ConfigError> {
		let name = match name {
			Some(name) => name.to_string(),
			None => match &self.default_cloud {
				Some(default) => default.clone(),
				None if self.clouds.len() == 1 => self
					.clouds
					.keys()
					.next()
					.cloned()
					.ok_or(ConfigError::NoDefaultCloud)?,
				None => return Err(ConfigError::NoDefaultCloud),
			},
		};

		let cloud = self
			.clouds
			.get(&name)
			.ok_or_else(|| ConfigError::UnknownCloud(name.clone()))?;
		let account =
			self.accounts
				.get(&cloud.account)
				.ok_or_else(|| ConfigError::UnknownAccount {
					cloud: name.clone(),
					account: cloud.account.clone(),
				})?;

		let credentials = Credentials::new(
			account.access_key.clone(),
			account.secret_key.clone(),
			account.api_host.clone(),
		);
		credentials.validate()?;

		Ok(CloudBinding {
			name,
			signer: Signer::new(credentials, cloud.id.clone()),
		})
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

fn environment() -> config::Environment {
	config::Environment::with_prefix(ENV_PREFIX).separator("__")
}
