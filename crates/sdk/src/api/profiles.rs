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

use super::Api;
use crate::{
	client::encode_segment,
	error::PandaError,
	models::{Model, ModelError, Profile, from_json, list_from_json},
	signing::Params,
};

impl Api {
	pub async fn profiles(&self) -> Result<Vec<Profile>, PandaError> {
		let body = self.client.get("/profiles.json", Params::new()).await?;
		Ok(list_from_json(&body)?)
	}

	/// Fetch a profile by id or by name
	pub async fn profile(&self, id_or_name: &str) -> Result<Profile, PandaError> {
		let path = format!("/profiles/{}.json", encode_segment(id_or_name));
		let body = self.client.get(&path, Params::new()).await?;
		Ok(from_json(&body)?)
	}

	pub async fn add_profile(&self, profile: &Profile) -> Result<Profile, PandaError> {
		let body = self
			.client
			.post("/profiles.json", profile.to_params()?)
			.await?;
		Ok(from_json(&body)?)
	}

	/// Create a profile from one of the service's built-in presets
	pub async fn add_profile_from_preset(
		&self,
		preset_name: &str,
		name: Option<&str>,
	) -> Result<Profile, PandaError> {
		let mut params = Params::from([("preset_name".to_string(), preset_name.to_string())]);
		if let Some(name) = name {
			params.insert("name".to_string(), name.to_string());
		}

		let body = self.client.post("/profiles.json", params).await?;
		Ok(from_json(&body)?)
	}

	/// Save changes to an existing profile; `profile.id` must be set
	pub async fn update_profile(&self, profile: &Profile) -> Result<Profile, PandaError> {
		let profile_id = profile.id.as_deref().ok_or(ModelError::MissingId {
			model: Profile::NAME,
		})?;

		let path = format!("/profiles/{}.json", encode_segment(profile_id));
		let body = self.client.put(&path, profile.to_params()?).await?;
		Ok(from_json(&body)?)
	}

	pub async fn delete_profile(&self, profile_id: &str) -> Result<(), PandaError> {
		let path = format!("/profiles/{}.json", encode_segment(profile_id));
		self.client.delete(&path, Params::new()).await?;
		Ok(())
	}
}
