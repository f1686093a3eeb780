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

/// Named encoding preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
	pub id: Option<String>,
	pub created_at: Option<String>,
	pub updated_at: Option<String>,
	/// Unique name used to refer to the profile, e.g. `h264`
	pub name: Option<String>,
	pub title: Option<String>,
	/// Built-in preset this profile derives from
	pub preset_name: Option<String>,
	pub extname: Option<String>,
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub upscale: Option<bool>,
	/// `letterbox`, `pad`, `crop`, `preserve` or `constrain`
	pub aspect_mode: Option<String>,
	pub two_pass: Option<bool>,
	pub video_bitrate: Option<u32>,
	pub audio_bitrate: Option<u32>,
	pub audio_sample_rate: Option<u32>,
	pub audio_channels: Option<u32>,
	pub fps: Option<f64>,
	pub keyframe_interval: Option<u32>,
	pub keyframe_rate: Option<f64>,
	pub clip_length: Option<String>,
	pub clip_offset: Option<String>,
	pub frame_count: Option<u32>,
	pub watermark_url: Option<String>,
	pub watermark_top: Option<String>,
	pub watermark_bottom: Option<String>,
	pub watermark_left: Option<String>,
	pub watermark_right: Option<String>,
	pub watermark_width: Option<String>,
	pub watermark_height: Option<String>,
	/// Custom encoder command line
	pub command: Option<String>,
}

impl Model for Profile {
	const NAME: &'static str = "Profile";
	const FIELDS: &'static [&'static str] = &[
		"id",
		"created_at",
		"updated_at",
		"name",
		"title",
		"preset_name",
		"extname",
		"width",
		"height",
		"upscale",
		"aspect_mode",
		"two_pass",
		"video_bitrate",
		"audio_bitrate",
		"audio_sample_rate",
		"audio_channels",
		"fps",
		"keyframe_interval",
		"keyframe_rate",
		"clip_length",
		"clip_offset",
		"frame_count",
		"watermark_url",
		"watermark_top",
		"watermark_bottom",
		"watermark_left",
		"watermark_right",
		"watermark_width",
		"watermark_height",
		"command",
	];
}
