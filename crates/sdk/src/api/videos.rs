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

use std::path::Path;

use serde_json::{Map, Value};

use super::{Api, EncodeOptions, EncodingFilter};
use crate::{
	client::encode_segment,
	error::PandaError,
	models::{
		Encoding, ModelError, UploadSession, Video, VideoPage, from_json, list_from_json,
	},
	signing::Params,
};

impl Api {
	/// List all videos of the cloud
	pub async fn videos(&self) -> Result<Vec<Video>, PandaError> {
		let body = self.client.get("/videos.json", Params::new()).await?;
		Ok(list_from_json(&body)?)
	}

	/// List one page of videos
	pub async fn videos_page(&self, page: u32, per_page: u32) -> Result<VideoPage, PandaError> {
		let params = Params::from([
			("include_root".to_string(), "true".to_string()),
			("page".to_string(), page.to_string()),
			("per_page".to_string(), per_page.to_string()),
		]);
		let body = self.client.get("/videos.json", params).await?;
		Ok(VideoPage::from_json(&body)?)
	}

	pub async fn video(&self, video_id: &str) -> Result<Video, PandaError> {
		let path = format!("/videos/{}.json", encode_segment(video_id));
		let body = self.client.get(&path, Params::new()).await?;
		Ok(from_json(&body)?)
	}

	/// Container and stream metadata extracted from the source file
	///
	/// The metadata keys depend on the file, so they are returned untyped.
	pub async fn video_metadata(&self, video_id: &str) -> Result<Map<String, Value>, PandaError> {
		let path = format!("/videos/{}/metadata.json", encode_segment(video_id));
		let body = self.client.get(&path, Params::new()).await?;

		match serde_json::from_str::<Value>(&body).map_err(ModelError::from)? {
			Value::Object(map) => Ok(map),
			_ => Err(ModelError::UnexpectedShape {
				model: "VideoMetadata",
				expected: "object",
				found: "non-object",
			}
			.into()),
		}
	}

	/// Encodings produced from one video
	pub async fn video_encodings(
		&self,
		video_id: &str,
		filter: &EncodingFilter,
	) -> Result<Vec<Encoding>, PandaError> {
		let path = format!("/videos/{}/encodings.json", encode_segment(video_id));
		let body = self.client.get(&path, filter.to_params()).await?;
		Ok(list_from_json(&body)?)
	}

	/// Create a video from a remote URL the service fetches itself
	pub async fn encode_video_url(
		&self,
		source_url: &str,
		options: &EncodeOptions,
	) -> Result<Video, PandaError> {
		let mut params = options.to_params();
		params.insert("source_url".to_string(), source_url.to_string());

		let body = self.client.post("/videos.json", params).await?;
		Ok(from_json(&body)?)
	}

	/// Create a video by uploading a local file
	pub async fn encode_video_file(
		&self,
		file_path: &Path,
		options: &EncodeOptions,
	) -> Result<Video, PandaError> {
		let body = self
			.client
			.post_file("/videos.json", options.to_params(), file_path)
			.await?;
		Ok(from_json(&body)?)
	}

	/// Open a resumable upload session for a file of `file_size` bytes
	pub async fn register_upload(
		&self,
		file_name: &str,
		file_size: u64,
		options: &EncodeOptions,
	) -> Result<UploadSession, PandaError> {
		let mut params = options.to_params();
		params.insert("file_name".to_string(), file_name.to_string());
		params.insert("file_size".to_string(), file_size.to_string());

		let body = self.client.post("/videos/upload.json", params).await?;
		Ok(from_json(&body)?)
	}

	/// Delete a video together with its encodings
	pub async fn delete_video(&self, video_id: &str) -> Result<(), PandaError> {
		let path = format!("/videos/{}.json", encode_segment(video_id));
		self.client.delete(&path, Params::new()).await?;
		Ok(())
	}

	/// Delete only the source file of a video, keeping its encodings
	pub async fn delete_video_source(&self, video_id: &str) -> Result<(), PandaError> {
		let path = format!("/videos/{}/source.json", encode_segment(video_id));
		self.client.delete(&path, Params::new()).await?;
		Ok(())
	}
}
