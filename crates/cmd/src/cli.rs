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

//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Panda CLI
#[derive(Parser)]
#[command(name = "panda")]
#[command(about = "Command-line client for the Panda video encoding API")]
#[command(version)]
pub struct Cli {
	/// Configuration file (toml, yaml or json); PANDA__* environment variables apply on top
	#[arg(short, long, global = true)]
	pub config: Option<String>,

	/// Cloud name from the configuration (defaults to `default_cloud`)
	#[arg(long, global = true)]
	pub cloud: Option<String>,

	/// Subcommand to run
	#[command(subcommand)]
	pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
	/// Print the signed parameters of a request without sending it
	Sign(SignArgs),
	#[command(flatten)]
	Api(ApiCommands),
}

/// Commands that talk to the API
#[derive(Subcommand)]
pub enum ApiCommands {
	/// Video operations
	#[command(subcommand)]
	Videos(VideoCommands),
	/// Encoding operations
	#[command(subcommand)]
	Encodings(EncodingCommands),
	/// Profile operations
	#[command(subcommand)]
	Profiles(ProfileCommands),
	/// Cloud settings
	#[command(subcommand)]
	Cloud(CloudCommands),
	/// Notification settings
	#[command(subcommand)]
	Notifications(NotificationCommands),
}

#[derive(Args)]
pub struct SignArgs {
	/// HTTP method
	#[arg(short, long, default_value = "GET")]
	pub method: String,
	/// Request path, e.g. /videos.json
	pub path: String,
	/// Request parameter as key=value (repeatable)
	#[arg(short, long = "param", value_parser = parse_key_value)]
	pub params: Vec<(String, String)>,
}

/// Profile selection shared by several commands
#[derive(Args)]
pub struct ProfileSelection {
	/// Profile names, comma separated
	#[arg(long, value_delimiter = ',')]
	pub profiles: Vec<String>,
	/// Encode with every profile of the cloud
	#[arg(long)]
	pub all_profiles: bool,
}

#[derive(Subcommand)]
pub enum VideoCommands {
	/// List videos
	List {
		/// Fetch a single page instead of every video
		#[arg(long)]
		page: Option<u32>,
		#[arg(long, default_value_t = 100)]
		per_page: u32,
	},
	/// Show a video
	Get { id: String },
	/// Show the metadata extracted from a video's source file
	Metadata { id: String },
	/// List the encodings of a video
	Encodings { id: String },
	/// Create a video from a remote URL
	Create {
		url: String,
		#[command(flatten)]
		selection: ProfileSelection,
	},
	/// Upload a local file as a new video
	Upload {
		file: PathBuf,
		#[command(flatten)]
		selection: ProfileSelection,
	},
	/// Delete a video and its encodings
	Delete { id: String },
	/// Delete only the source file of a video
	DeleteSource { id: String },
}

#[derive(Subcommand)]
pub enum EncodingCommands {
	/// List encodings
	List {
		#[arg(long)]
		status: Option<String>,
		#[arg(long)]
		profile_name: Option<String>,
		#[arg(long)]
		video_id: Option<String>,
	},
	/// Show an encoding
	Get { id: String },
	/// Encode an existing video with a profile
	Create {
		video_id: String,
		#[arg(long, conflicts_with = "profile_name", required_unless_present = "profile_name")]
		profile_id: Option<String>,
		#[arg(long)]
		profile_name: Option<String>,
	},
	/// Cancel a running encoding
	Cancel { id: String },
	/// Retry a failed encoding
	Retry { id: String },
	/// Delete an encoding
	Delete { id: String },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
	/// List profiles
	List,
	/// Show a profile by id or name
	Get { id_or_name: String },
	/// Create a profile from a built-in preset
	CreateFromPreset {
		preset: String,
		#[arg(long)]
		name: Option<String>,
	},
	/// Delete a profile
	Delete { id: String },
}

#[derive(Subcommand)]
pub enum CloudCommands {
	/// Show the cloud settings
	Get,
	/// Update cloud settings
	Update {
		/// Setting as key=value (repeatable)
		#[arg(short, long = "param", value_parser = parse_key_value)]
		params: Vec<(String, String)>,
	},
}

#[derive(Subcommand)]
pub enum NotificationCommands {
	/// Show the notification settings
	Get,
	/// Update the notification settings
	Update {
		#[arg(long)]
		url: Option<String>,
		#[arg(long)]
		delay: Option<u32>,
		/// Event toggle as name=true|false (repeatable)
		#[arg(long = "event", value_parser = parse_key_value)]
		events: Vec<(String, String)>,
	},
}

/// Parse a `key=value` argument
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
	match arg.split_once('=') {
		Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
		_ => Err(format!("expected key=value, got `{}`", arg)),
	}
}
