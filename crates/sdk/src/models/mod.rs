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

//! API data models
//!
//! Every model declares the JSON fields it accepts in [`Model::FIELDS`].
//! Responses are checked against that table before decoding, so a field the
//! client does not know about is reported by name instead of being dropped.
//! Going the other way, [`Model::to_params`] flattens a model into the
//! string parameters used by write requests.

mod cloud;
mod encoding;
mod notifications;
mod profile;
mod video;

pub use cloud::Cloud;
pub use encoding::Encoding;
pub use notifications::{NotificationEvents, Notifications};
pub use profile::Profile;
pub use video::{UploadSession, Video, VideoPage};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::signing::Params;

/// Error types for model transformation
#[derive(Debug, Error)]
pub enum ModelError {
	#[error("Unknown field `{field}` for {model}")]
	UnknownField { field: String, model: &'static str },
	#[error("Expected JSON {expected} for {model}, found {found}")]
	UnexpectedShape {
		model: &'static str,
		expected: &'static str,
		found: &'static str,
	},
	#[error("Malformed {model}: {source}")]
	Malformed {
		model: &'static str,
		#[source]
		source: serde_json::Error,
	},
	#[error("{model} has no id")]
	MissingId { model: &'static str },
	#[error("Invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
}

/// A typed API record with a static field table
pub trait Model: Serialize + DeserializeOwned {
	/// Name used in error messages
	const NAME: &'static str;

	/// Every JSON field this model accepts
	const FIELDS: &'static [&'static str];

	/// Fields owned by the server and never sent back
	const READ_ONLY: &'static [&'static str] = &["id", "created_at", "updated_at"];

	/// Writable, non-null fields as request parameters
	fn to_params(&self) -> Result<Params, ModelError> {
		let value = serde_json::to_value(self).map_err(|source| ModelError::Malformed {
			model: Self::NAME,
			source,
		})?;
		let map = match value {
			Value::Object(map) => map,
			other => {
				return Err(ModelError::UnexpectedShape {
					model: Self::NAME,
					expected: "object",
					found: json_type(&other),
				});
			}
		};

		let mut params = Params::new();
		for (key, value) in &map {
			if !Self::READ_ONLY.contains(&key.as_str()) {
				flatten_into(&mut params, key.clone(), value);
			}
		}
		Ok(params)
	}
}

/// Decode a single model from a response body
pub fn from_json<T: Model>(body: &str) -> Result<T, ModelError> {
	from_value(serde_json::from_str(body)?)
}

/// Decode a JSON array of models from a response body
pub fn list_from_json<T: Model>(body: &str) -> Result<Vec<T>, ModelError> {
	match serde_json::from_str::<Value>(body)? {
		Value::Array(items) => items.into_iter().map(from_value).collect(),
		other => Err(ModelError::UnexpectedShape {
			model: T::NAME,
			expected: "array",
			found: json_type(&other),
		}),
	}
}

/// Decode a model from an already parsed JSON value
pub fn from_value<T: Model>(value: Value) -> Result<T, ModelError> {
	check_fields(&value, T::NAME, T::FIELDS)?;
	serde_json::from_value(value).map_err(|source| ModelError::Malformed {
		model: T::NAME,
		source,
	})
}

/// Reject objects carrying keys outside `fields`
pub(crate) fn check_fields(
	value: &Value,
	model: &'static str,
	fields: &[&str],
) -> Result<(), ModelError> {
	let object = value.as_object().ok_or(ModelError::UnexpectedShape {
		model,
		expected: "object",
		found: json_type(value),
	})?;

	match object.keys().find(|key| !fields.contains(&key.as_str())) {
		Some(field) => Err(ModelError::UnknownField {
			field: field.clone(),
			model,
		}),
		None => Ok(()),
	}
}

/// Flatten a JSON object into request parameters
///
/// Nested objects become `parent[child]`, arrays become `parent[0]`,
/// booleans become `true`/`false` and nulls are skipped.
pub fn flatten_params(value: &Value) -> Params {
	let mut params = Params::new();
	if let Value::Object(map) = value {
		for (key, value) in map {
			flatten_into(&mut params, key.clone(), value);
		}
	}
	params
}

fn flatten_into(params: &mut Params, key: String, value: &Value) {
	match value {
		Value::Null => {}
		Value::Bool(flag) => {
			params.insert(key, flag.to_string());
		}
		Value::Number(number) => {
			params.insert(key, number.to_string());
		}
		Value::String(text) => {
			params.insert(key, text.clone());
		}
		Value::Array(items) => {
			for (index, item) in items.iter().enumerate() {
				flatten_into(params, format!("{}[{}]", key, index), item);
			}
		}
		Value::Object(map) => {
			for (child, item) in map {
				flatten_into(params, format!("{}[{}]", key, child), item);
			}
		}
	}
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Assert that `T::FIELDS` lists exactly the fields `T` serializes
#[cfg(test)]
pub(crate) fn assert_field_table<T: Model + Default>() {
	let value = serde_json::to_value(T::default()).unwrap();
	let mut serialized: Vec<&str> = value
		.as_object()
		.unwrap()
		.keys()
		.map(String::as_str)
		.collect();
	let mut declared = T::FIELDS.to_vec();
	serialized.sort_unstable();
	declared.sort_unstable();
	assert_eq!(serialized, declared, "field table out of sync for {}", T::NAME);
}
