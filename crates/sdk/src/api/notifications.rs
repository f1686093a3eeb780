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
	error::PandaError,
	models::{Model, Notifications, from_json},
	signing::Params,
};

impl Api {
	pub async fn notifications(&self) -> Result<Notifications, PandaError> {
		let body = self
			.client
			.get("/notifications.json", Params::new())
			.await?;
		Ok(from_json(&body)?)
	}

	/// Replace the notification settings; unset fields are left untouched
	pub async fn update_notifications(
		&self,
		notifications: &Notifications,
	) -> Result<Notifications, PandaError> {
		let body = self
			.client
			.put("/notifications.json", notifications.to_params()?)
			.await?;
		Ok(from_json(&body)?)
	}
}
