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

use serde::Deserialize;
use thiserror::Error;

use crate::{config::ConfigError, models::ModelError};

/// Error types for client operations
#[derive(Debug, Error)]
pub enum PandaError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),
	#[error("Invalid request path: {0}")]
	InvalidPath(String),
	#[error("API error ({status}) {code}: {message}")]
	Api {
		status: u16,
		code: String,
		message: String,
	},
	#[error("Unexpected response ({status}): {body}")]
	UnexpectedResponse { status: u16, body: String },
	#[error(transparent)]
	Model(#[from] ModelError),
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl PandaError {
	/// Build an error from a non-success response
	///
	/// Bodies carrying the `{"error": ..., "message": ...}` envelope become
	/// [`PandaError::Api`]; anything else is kept verbatim.
	pub fn from_response(status: u16, body: &str) -> Self {
		match serde_json::from_str::<ErrorEnvelope>(body) {
			Ok(envelope) => PandaError::Api {
				status,
				code: envelope.error,
				message: envelope.message.unwrap_or_default(),
			},
			Err(_) => PandaError::UnexpectedResponse {
				status,
				body: body.to_string(),
			},
		}
	}
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
	error: String,
	message: Option<String>,
}
