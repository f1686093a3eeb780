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

use super::{Api, EncodingFilter, ProfileRef};
use crate::{
	client::encode_segment,
	error::PandaError,
	models::{Encoding, from_json, list_from_json},
	signing::Params,
};

impl Api {
	pub async fn encodings(&self, filter: &EncodingFilter) -> Result<Vec<Encoding>, PandaError> {
		let body = self
			.client
			.get("/encodings.json", filter.to_params())
			.await?;
		Ok(list_from_json(&body)?)
	}

	pub async fn encoding(&self, encoding_id: &str) -> Result<Encoding, PandaError> {
		let path = format!("/encodings/{}.json", encode_segment(encoding_id));
		let body = self.client.get(&path, Params::new()).await?;
		Ok(from_json(&body)?)
	}

	/// Encode an existing video with one more profile
	pub async fn create_encoding(
		&self,
		video_id: &str,
		profile: &ProfileRef,
	) -> Result<Encoding, PandaError> {
		let mut params = Params::from([profile.to_param()]);
		params.insert("video_id".to_string(), video_id.to_string());

		let body = self.client.post("/encodings.json", params).await?;
		Ok(from_json(&body)?)
	}

	pub async fn cancel_encoding(&self, encoding_id: &str) -> Result<(), PandaError> {
		let path = format!("/encodings/{}/cancel.json", encode_segment(encoding_id));
		self.client.post(&path, Params::new()).await?;
		Ok(())
	}

	/// Restart a failed encoding
	pub async fn retry_encoding(&self, encoding_id: &str) -> Result<(), PandaError> {
		let path = format!("/encodings/{}/retry.json", encode_segment(encoding_id));
		self.client.post(&path, Params::new()).await?;
		Ok(())
	}

	pub async fn delete_encoding(&self, encoding_id: &str) -> Result<(), PandaError> {
		let path = format!("/encodings/{}.json", encode_segment(encoding_id));
		self.client.delete(&path, Params::new()).await?;
		Ok(())
	}
}
