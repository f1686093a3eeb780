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

//! Logging initialization for the `panda` command
//!
//! # Configuration
//!
//! - `RUST_LOG`: Log level filter (default: `warn`)
//!   - Examples: `debug`, `info`, `panda=debug`
//!   - `panda=debug` shows every request line issued by the SDK
//!
//! - `LOG_DIR`: Root directory for log files (default: unset, no file output)
//!   - Log files are created in `{LOG_DIR}/panda/`
//!   - Rotation: one file per day (UTC), e.g. `panda.2026-01-03.log`
//!
//! - `LOG_TO_CONSOLE`: Console output on stderr (default: `true`)
//!   - Set to `false`, `0`, or `no` to log to the file only
//!
//! Stdout is reserved for command output, so logs never go there.

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use tracing::debug;
use tracing_appender::{
	non_blocking,
	rolling::{self, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log directory component and file prefix
pub const LOG_COMPONENT_NAME: &str = "panda";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = true;

// Store log guard to prevent log loss on program exit
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Setup daily-rolling file logging in `log_dir`
fn setup_file_logging(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	std::fs::create_dir_all(log_dir)
		.with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

	let file_appender = rolling::RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(LOG_COMPONENT_NAME.to_string())
		.filename_suffix(".log")
		.build(log_dir)
		.with_context(|| {
			format!(
				"Failed to create rolling file appender in {}",
				log_dir.display()
			)
		})?;

	let (file_writer, guard) = non_blocking(file_appender);
	LOG_GUARD.set(guard).ok();

	Ok(file_writer)
}

fn console_enabled(value: Option<&str>) -> bool {
	match value {
		Some(value) => !matches!(value, "false" | "0" | "no"),
		None => DEFAULT_LOG_TO_CONSOLE,
	}
}

/// Initialize logging with console output and optional file output
///
/// See module-level documentation for environment variable configuration.
pub fn init_logging() -> Result<()> {
	dotenv::dotenv().ok();

	let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

	let log_dir = env::var("LOG_DIR")
		.ok()
		.map(|root| Path::new(&root).join(LOG_COMPONENT_NAME));
	let file_layer = match &log_dir {
		Some(dir) => Some(
			fmt::layer()
				.with_writer(setup_file_logging(dir)?)
				.with_timer(fmt::time::UtcTime::rfc_3339())
				.with_thread_ids(true)
				.with_target(true)
				.with_ansi(false),
		),
		None => None,
	};

	let log_to_console = console_enabled(env::var("LOG_TO_CONSOLE").ok().as_deref());
	let console_layer = log_to_console.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_target(true)
			.with_ansi(true)
	});

	tracing_subscriber::registry()
		.with(filter)
		.with(file_layer)
		.with(console_layer)
		.try_init()
		.context("Failed to initialize logging")?;

	debug!(target: "panda", "Log level: {}", log_level);
	if let Some(dir) = &log_dir {
		debug!(
			target: "panda",
			"Log files: {}/{}.YYYY-MM-DD.log (daily rolling)",
			dir.display(),
			LOG_COMPONENT_NAME
		);
	}

	Ok(())
}
