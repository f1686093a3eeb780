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

use serde::{Deserialize, Serialize};

use super::Model;

/// Output of applying a profile to a video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encoding {
	pub id: Option<String>,
	pub video_id: Option<String>,
	pub profile_id: Option<String>,
	pub profile_name: Option<String>,
	pub created_at: Option<String>,
	pub updated_at: Option<String>,
	pub started_encoding_at: Option<String>,
	/// Seconds spent encoding
	pub encoding_time: Option<u64>,
	/// Percent complete, 0 to 100
	pub encoding_progress: Option<u32>,
	/// `processing`, `success`, `fail` or `cancelled`
	pub status: Option<String>,
	pub extname: Option<String>,
	pub path: Option<String>,
	pub mime_type: Option<String>,
	pub files: Option<Vec<String>>,
	pub duration: Option<u64>,
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub file_size: Option<u64>,
	pub video_bitrate: Option<u32>,
	pub audio_bitrate: Option<u32>,
	pub video_codec: Option<String>,
	pub audio_codec: Option<String>,
	pub fps: Option<f64>,
	pub audio_channels: Option<u32>,
	pub audio_sample_rate: Option<u32>,
	pub error_message: Option<String>,
	pub error_class: Option<String>,
}

impl Model for Encoding {
	const NAME: &'static str = "Encoding";
	const FIELDS: &'static [&'static str] = &[
		"id",
		"video_id",
		"profile_id",
		"profile_name",
		"created_at",
		"updated_at",
		"started_encoding_at",
		"encoding_time",
		"encoding_progress",
		"status",
		"extname",
		"path",
		"mime_type",
		"files",
		"duration",
		"width",
		"height",
		"file_size",
		"video_bitrate",
		"audio_bitrate",
		"video_codec",
		"audio_codec",
		"fps",
		"audio_channels",
		"audio_sample_rate",
		"error_message",
		"error_class",
	];
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::{assert_field_table, from_json, list_from_json};

	#[test]
	fn test_field_table() {
		assert_field_table::<Encoding>();
	}

	#[test]
	fn test_decode_encoding_list() {
		let body = r#"[
			{
				"id": "be4f5d6b3a2f",
				"video_id": "d891d9a45c69",
				"profile_id": "40d9f8711d64",
				"profile_name": "h264",
				"status": "processing",
				"encoding_progress": 42,
				"files": ["be4f5d6b3a2f.mp4"]
			},
			{
				"id": "c35fe8a3b6e0",
				"video_id": "d891d9a45c69",
				"status": "success",
				"encoding_progress": 100
			}
		]"#;
		let encodings: Vec<Encoding> = list_from_json(body).unwrap();

		assert_eq!(encodings.len(), 2);
		assert_eq!(encodings[0].encoding_progress, Some(42));
		assert_eq!(
			encodings[0].files.as_deref(),
			Some(&["be4f5d6b3a2f.mp4".to_string()][..])
		);
		assert_eq!(encodings[1].status.as_deref(), Some("success"));
	}

	#[test]
	fn test_encoding_params_flatten_files() {
		let encoding: Encoding =
			from_json(r#"{"id":"x","video_id":"v","files":["a.mp4","a_1.jpg"]}"#).unwrap();
		let params = encoding.to_params().unwrap();

		assert_eq!(params.get("video_id").unwrap(), "v");
		assert_eq!(params.get("files[0]").unwrap(), "a.mp4");
		assert_eq!(params.get("files[1]").unwrap(), "a_1.jpg");
		assert!(!params.contains_key("id"));
	}
}
