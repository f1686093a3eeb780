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

use std::{path::Path, time::Duration};

use reqwest::{Client as ReqwestClient, Method, Request, Url, multipart};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::{
	config::{API_VERSION, DEFAULT_API_PORT, DEFAULT_TIMEOUT_SECS, PandaConfig},
	error::PandaError,
	signing::{FILE_PARAM, Params, Signer},
};

/// Transport options for [`Client`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
	/// 443 talks https to the bare host, anything else plain http on that port
	pub api_port: u16,
	pub timeout: Duration,
	/// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment
	pub use_system_proxy: bool,
}

impl Default for ClientOptions {
	fn default() -> Self {
		Self {
			api_port: DEFAULT_API_PORT,
			timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
			use_system_proxy: true,
		}
	}
}

/// Client for the Panda REST API
///
/// Each call signs its parameters with the bound [`Signer`] and returns the raw
/// response body. GET and DELETE carry the signed parameters in the query
/// string, POST and PUT in an url-encoded form body.
#[derive(Debug, Clone)]
pub struct Client {
	signer: Signer,
	base_url: String,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client with default options
	pub fn new(signer: Signer) -> Result<Self, PandaError> {
		Self::with_options(signer, ClientOptions::default())
	}

	/// Create a new client with custom transport options
	pub fn with_options(signer: Signer, options: ClientOptions) -> Result<Self, PandaError> {
		let mut builder = ReqwestClient::builder().timeout(options.timeout);
		if !options.use_system_proxy {
			builder = builder.no_proxy();
		}
		let client = builder.build()?;

		Ok(Self {
			base_url: api_url(signer.credentials().api_host(), options.api_port),
			signer,
			client,
		})
	}

	/// Create a client for a configured cloud (`None` selects the default cloud)
	pub fn from_config(config: &PandaConfig, cloud: Option<&str>) -> Result<Self, PandaError> {
		let binding = config.resolve_cloud(cloud)?;
		debug!(target: "panda", "Using cloud {} ({})", binding.name, binding.signer.cloud_id());

		Self::with_options(
			binding.signer,
			ClientOptions {
				api_port: config.api_port,
				timeout: config.timeout(),
				..Default::default()
			},
		)
	}

	pub fn signer(&self) -> &Signer {
		&self.signer
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub async fn get(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.send(Method::GET, path, params).await
	}

	pub async fn post(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.send(Method::POST, path, params).await
	}

	pub async fn put(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.send(Method::PUT, path, params).await
	}

	pub async fn delete(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.send(Method::DELETE, path, params).await
	}

	/// Upload a local file as a multipart POST
	///
	/// The file travels in the `file` part; the remaining parameters are
	/// signed as usual.
	pub async fn post_file(
		&self,
		path: &str,
		mut params: Params,
		file_path: &Path,
	) -> Result<String, PandaError> {
		let file_name = file_path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| "upload".to_string());
		let url = self.url(path)?;
		let contents = tokio::fs::read(file_path).await?;

		params.insert(FILE_PARAM.to_string(), file_name.clone());
		let signed = self.signer.sign(Method::POST.as_str(), path, params);

		let mut form = multipart::Form::new();
		for (key, value) in signed {
			if key != FILE_PARAM {
				form = form.text(key, value);
			}
		}
		form = form.part(
			FILE_PARAM,
			multipart::Part::bytes(contents).file_name(file_name),
		);

		let request = self.client.post(url).multipart(form).build()?;
		self.execute(request).await
	}

	/// Build the signed request without sending it
	pub fn build_request(
		&self,
		method: Method,
		path: &str,
		params: Params,
	) -> Result<Request, PandaError> {
		let url = self.url(path)?;
		let signed = self.signer.sign(method.as_str(), path, params);
		let builder = self.client.request(method.clone(), url);

		let builder = if method == Method::GET || method == Method::DELETE {
			builder.query(&signed)
		} else {
			builder.form(&signed)
		};

		Ok(builder.build()?)
	}

	async fn send(&self, method: Method, path: &str, params: Params) -> Result<String, PandaError> {
		let request = self.build_request(method, path, params)?;
		self.execute(request).await
	}

	async fn execute(&self, request: Request) -> Result<String, PandaError> {
		// Path only: the query carries the access key and signature
		debug!(target: "panda", "{} {}", request.method(), request.url().path());

		let response = self.client.execute(request).await?;
		let status = response.status().as_u16();
		let body = response.text().await?;

		check_response(status, body)
	}

	/// Full request URL for `path`
	///
	/// The signature covers `path` as given, so it must reach the server
	/// unchanged: an absolute path with no query, fragment, dot segments or
	/// characters the URL parser would re-encode.
	fn url(&self, path: &str) -> Result<Url, PandaError> {
		let invalid = || PandaError::InvalidPath(path.to_string());
		if !path.starts_with('/') {
			return Err(invalid());
		}

		let url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|_| invalid())?;
		let sent = url.path().strip_prefix(&format!("/{}", API_VERSION));
		if sent != Some(path) || url.query().is_some() || url.fragment().is_some() {
			return Err(invalid());
		}
		Ok(url)
	}
}

/// Percent-encode a caller-supplied value for use as one path segment
///
/// Only `A-Z a-z 0-9 * - . _` stay literal, so the result never contains a
/// separator and is left alone by the URL parser.
pub fn encode_segment(segment: &str) -> String {
	form_urlencoded::byte_serialize(segment.as_bytes())
		.collect::<String>()
		.replace('+', "%20")
}

/// Base URL for an API host and port
pub fn api_url(host: &str, port: u16) -> String {
	if port == DEFAULT_API_PORT {
		format!("https://{}/{}", host, API_VERSION)
	} else {
		format!("http://{}:{}/{}", host, port, API_VERSION)
	}
}

/// Return the body of a successful (2xx, including 207) response
pub fn check_response(status: u16, body: String) -> Result<String, PandaError> {
	if (200..300).contains(&status) {
		return Ok(body);
	}

	let error = PandaError::from_response(status, &body);
	warn!(target: "panda", "Request failed: {}", error);
	Err(error)
}

/// Synchronous client wrapper
///
/// This wraps the async client and runs it in a tokio runtime.
/// For new code, prefer using the async Client directly.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client
	pub fn new(client: Client) -> Result<Self, PandaError> {
		let runtime = tokio::runtime::Runtime::new()?;
		Ok(Self { client, runtime })
	}

	pub fn client(&self) -> &Client {
		&self.client
	}

	pub fn get(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.runtime.block_on(self.client.get(path, params))
	}

	pub fn post(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.runtime.block_on(self.client.post(path, params))
	}

	pub fn put(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.runtime.block_on(self.client.put(path, params))
	}

	pub fn delete(&self, path: &str, params: Params) -> Result<String, PandaError> {
		self.runtime.block_on(self.client.delete(path, params))
	}
}
