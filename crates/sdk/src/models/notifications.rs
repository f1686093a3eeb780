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

/// Webhook notification settings for a cloud
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
	/// Callback URL
	pub url: Option<String>,
	/// Seconds to wait before sending a notification
	pub delay: Option<u32>,
	pub events: NotificationEvents,
}

/// Which events trigger a notification
///
/// Sent as `events[video_created]=true` and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationEvents {
	pub video_created: Option<bool>,
	pub video_encoded: Option<bool>,
	pub encoding_progress: Option<bool>,
	pub encoding_completed: Option<bool>,
}

impl Model for Notifications {
	const NAME: &'static str = "Notifications";
	const FIELDS: &'static [&'static str] = &["url", "delay", "events"];
	const READ_ONLY: &'static [&'static str] = &[];
}
