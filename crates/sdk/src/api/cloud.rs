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
	models::{Cloud, from_json},
	signing::Params,
};

impl Api {
	/// Settings of the bound cloud
	pub async fn cloud(&self) -> Result<Cloud, PandaError> {
		let body = self.client.get(&self.cloud_path(), Params::new()).await?;
		Ok(from_json(&body)?)
	}

	/// Update the bound cloud
	///
	/// Accepts any writable cloud setting, including `aws_access_key` and
	/// `aws_secret_key`, which are never returned by the service. Use
	/// [`Model::to_params`](crate::models::Model::to_params) on a [`Cloud`]
	/// for the returned fields.
	pub async fn update_cloud(&self, params: Params) -> Result<Cloud, PandaError> {
		let body = self.client.put(&self.cloud_path(), params).await?;
		Ok(from_json(&body)?)
	}

	fn cloud_path(&self) -> String {
		let cloud_id = self.client.signer().cloud_id();
		format!("/clouds/{}.json", encode_segment(cloud_id))
	}
}
