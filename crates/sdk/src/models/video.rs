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
use serde_json::Value;

use super::{Model, ModelError, check_fields, from_value};

/// Source video uploaded to a cloud
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
	pub id: Option<String>,
	pub created_at: Option<String>,
	pub updated_at: Option<String>,
	pub original_filename: Option<String>,
	pub extname: Option<String>,
	pub source_url: Option<String>,
	pub path: Option<String>,
	pub mime_type: Option<String>,
	/// `processing`, `success` or `fail`
	pub status: Option<String>,
	/// Duration in milliseconds
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
	pub payload: Option<String>,
	pub error_message: Option<String>,
	pub error_class: Option<String>,
}

impl Model for Video {
	const NAME: &'static str = "Video";
	const FIELDS: &'static [&'static str] = &[
		"id",
		"created_at",
		"updated_at",
		"original_filename",
		"extname",
		"source_url",
		"path",
		"mime_type",
		"status",
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
		"payload",
		"error_message",
		"error_class",
	];
}

/// One page of videos, as returned with `include_root=true`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoPage {
	pub videos: Vec<Video>,
	pub page: u32,
	pub per_page: u32,
	pub total: u64,
}

impl VideoPage {
	const NAME: &'static str = "VideoPage";
	const FIELDS: &'static [&'static str] = &["videos", "page", "per_page", "total"];

	/// Decode a page, checking both the envelope and every video in it
	pub fn from_json(body: &str) -> Result<Self, ModelError> {
		let value: Value = serde_json::from_str(body)?;
		check_fields(&value, Self::NAME, Self::FIELDS)?;

		let videos = match value.get("videos") {
			Some(Value::Array(items)) => items
				.iter()
				.cloned()
				.map(from_value::<Video>)
				.collect::<Result<Vec<_>, _>>()?,
			Some(Value::Null) | None => Vec::new(),
			Some(_) => {
				return Err(ModelError::UnexpectedShape {
					model: Self::NAME,
					expected: "array",
					found: "non-array videos",
				});
			}
		};

		let counters = PageCounters::deserialize(&value).map_err(|source| ModelError::Malformed {
			model: Self::NAME,
			source,
		})?;

		Ok(Self {
			videos,
			page: counters.page.unwrap_or(0),
			per_page: counters.per_page.unwrap_or(0),
			total: counters.total.unwrap_or(0),
		})
	}
}

// Absent or null counters read as 0; anything else must fit the type
#[derive(Deserialize)]
struct PageCounters {
	#[serde(default)]
	page: Option<u32>,
	#[serde(default)]
	per_page: Option<u32>,
	#[serde(default)]
	total: Option<u64>,
}

/// Resumable upload session returned by `POST /videos/upload.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSession {
	pub id: Option<String>,
	/// URL the file content is sent to
	pub location: Option<String>,
}

impl Model for UploadSession {
	const NAME: &'static str = "UploadSession";
	const FIELDS: &'static [&'static str] = &["id", "location"];
}
