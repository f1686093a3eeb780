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

//! Command execution

use anyhow::{Context, Result, bail, ensure};
use panda_sdk::{
	Api, EncodeOptions, EncodingFilter, NotificationEvents, Notifications, PandaConfig, Params,
	ProfileRef,
};
use serde::Serialize;
use tracing::info;

use crate::cli::{
	ApiCommands, Cli, CloudCommands, Commands, EncodingCommands, NotificationCommands,
	ProfileCommands, ProfileSelection, SignArgs, VideoCommands,
};

/// Run the parsed command line
pub async fn execute(cli: Cli) -> Result<()> {
	let config = load_config(cli.config.as_deref())?;
	let cloud = cli.cloud.as_deref();

	match cli.command {
		Commands::Sign(args) => sign(&config, cloud, &args),
		Commands::Api(command) => {
			let api = Api::from_config(&config, cloud).context("Failed to create API client")?;
			call_api(&api, command).await
		}
	}
}

async fn call_api(api: &Api, command: ApiCommands) -> Result<()> {
	match command {
		ApiCommands::Videos(cmd) => videos(api, cmd).await,
		ApiCommands::Encodings(cmd) => encodings(api, cmd).await,
		ApiCommands::Profiles(cmd) => profiles(api, cmd).await,
		ApiCommands::Cloud(cmd) => cloud_settings(api, cmd).await,
		ApiCommands::Notifications(cmd) => notifications(api, cmd).await,
	}
}

fn load_config(path: Option<&str>) -> Result<PandaConfig> {
	match path {
		Some(path) => PandaConfig::from_file(path)
			.with_context(|| format!("Failed to load configuration from {}", path)),
		None => PandaConfig::from_env().context("Failed to load configuration from environment"),
	}
}

fn sign(config: &PandaConfig, cloud: Option<&str>, args: &SignArgs) -> Result<()> {
	ensure!(
		args.path.starts_with('/'),
		"Request path must start with '/': {}",
		args.path
	);

	let binding = config.resolve_cloud(cloud)?;
	let params: Params = args.params.iter().cloned().collect();
	print_json(&binding.signer.sign(&args.method, &args.path, params))
}

async fn videos(api: &Api, cmd: VideoCommands) -> Result<()> {
	match cmd {
		VideoCommands::List { page, per_page } => match page {
			Some(page) => print_json(&api.videos_page(page, per_page).await?),
			None => print_json(&api.videos().await?),
		},
		VideoCommands::Get { id } => print_json(&api.video(&id).await?),
		VideoCommands::Metadata { id } => print_json(&api.video_metadata(&id).await?),
		VideoCommands::Encodings { id } => {
			print_json(&api.video_encodings(&id, &EncodingFilter::default()).await?)
		}
		VideoCommands::Create { url, selection } => {
			let video = api.encode_video_url(&url, &encode_options(selection)).await?;
			info!(target: "panda", "Created video {}", video.id.as_deref().unwrap_or("?"));
			print_json(&video)
		}
		VideoCommands::Upload { file, selection } => {
			let video = api
				.encode_video_file(&file, &encode_options(selection))
				.await
				.with_context(|| format!("Failed to upload {}", file.display()))?;
			print_json(&video)
		}
		VideoCommands::Delete { id } => {
			api.delete_video(&id).await?;
			print_done("deleted", &id)
		}
		VideoCommands::DeleteSource { id } => {
			api.delete_video_source(&id).await?;
			print_done("source_deleted", &id)
		}
	}
}

async fn encodings(api: &Api, cmd: EncodingCommands) -> Result<()> {
	match cmd {
		EncodingCommands::List {
			status,
			profile_name,
			video_id,
		} => {
			let filter = EncodingFilter {
				status,
				profile_name,
				video_id,
				..Default::default()
			};
			print_json(&api.encodings(&filter).await?)
		}
		EncodingCommands::Get { id } => print_json(&api.encoding(&id).await?),
		EncodingCommands::Create {
			video_id,
			profile_id,
			profile_name,
		} => {
			let profile = match (profile_id, profile_name) {
				(Some(id), _) => ProfileRef::Id(id),
				(None, Some(name)) => ProfileRef::Name(name),
				(None, None) => bail!("Either --profile-id or --profile-name is required"),
			};
			print_json(&api.create_encoding(&video_id, &profile).await?)
		}
		EncodingCommands::Cancel { id } => {
			api.cancel_encoding(&id).await?;
			print_done("cancelled", &id)
		}
		EncodingCommands::Retry { id } => {
			api.retry_encoding(&id).await?;
			print_done("retried", &id)
		}
		EncodingCommands::Delete { id } => {
			api.delete_encoding(&id).await?;
			print_done("deleted", &id)
		}
	}
}

async fn profiles(api: &Api, cmd: ProfileCommands) -> Result<()> {
	match cmd {
		ProfileCommands::List => print_json(&api.profiles().await?),
		ProfileCommands::Get { id_or_name } => print_json(&api.profile(&id_or_name).await?),
		ProfileCommands::CreateFromPreset { preset, name } => {
			print_json(&api.add_profile_from_preset(&preset, name.as_deref()).await?)
		}
		ProfileCommands::Delete { id } => {
			api.delete_profile(&id).await?;
			print_done("deleted", &id)
		}
	}
}

async fn cloud_settings(api: &Api, cmd: CloudCommands) -> Result<()> {
	match cmd {
		CloudCommands::Get => print_json(&api.cloud().await?),
		CloudCommands::Update { params } => {
			ensure!(!params.is_empty(), "Nothing to update, pass --param key=value");
			print_json(&api.update_cloud(params.into_iter().collect()).await?)
		}
	}
}

async fn notifications(api: &Api, cmd: NotificationCommands) -> Result<()> {
	match cmd {
		NotificationCommands::Get => print_json(&api.notifications().await?),
		NotificationCommands::Update { url, delay, events } => {
			let update = Notifications {
				url,
				delay,
				events: notification_events(&events)?,
			};
			print_json(&api.update_notifications(&update).await?)
		}
	}
}

fn encode_options(selection: ProfileSelection) -> EncodeOptions {
	EncodeOptions {
		profiles: selection.profiles,
		use_all_profiles: selection.all_profiles,
		..Default::default()
	}
}

/// Build event toggles from `name=true|false` pairs
fn notification_events(pairs: &[(String, String)]) -> Result<NotificationEvents> {
	let mut events = NotificationEvents::default();
	for (name, value) in pairs {
		let enabled: bool = value
			.parse()
			.with_context(|| format!("Event `{}` must be true or false, got `{}`", name, value))?;
		let slot = match name.as_str() {
			"video_created" => &mut events.video_created,
			"video_encoded" => &mut events.video_encoded,
			"encoding_progress" => &mut events.encoding_progress,
			"encoding_completed" => &mut events.encoding_completed,
			other => bail!("Unknown notification event: {}", other),
		};
		*slot = Some(enabled);
	}
	Ok(events)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn print_done(status: &str, id: &str) -> Result<()> {
	print_json(&serde_json::json!({ "status": status, "id": id }))
}
