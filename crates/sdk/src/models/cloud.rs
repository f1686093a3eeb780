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

/// Encoding cloud settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloud {
	pub id: Option<String>,
	pub name: Option<String>,
	pub url: Option<String>,
	pub s3_videos_bucket: Option<String>,
	pub s3_private_access: Option<bool>,
	pub created_at: Option<String>,
	pub updated_at: Option<String>,
}

impl Model for Cloud {
	const NAME: &'static str = "Cloud";
	const FIELDS: &'static [&'static str] = &[
		"id",
		"name",
		"url",
		"s3_videos_bucket",
		"s3_private_access",
		"created_at",
		"updated_at",
	];
	// `url` is derived from the bucket by the service
	const READ_ONLY: &'static [&'static str] = &["id", "url", "created_at", "updated_at"];
}
