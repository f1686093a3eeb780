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

//! Panda CLI
//!
//! Provides commands for:
//! - `sign`: Print the signed parameters of a request
//! - `videos`, `encodings`, `profiles`: Manage cloud resources
//! - `cloud`, `notifications`: Read and change cloud settings
//!
//! Every command prints JSON on stdout; logs go to stderr.

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use crate::{cli::Cli, logging::init_logging};

#[tokio::main]
async fn main() -> Result<()> {
	// Initialize logging first
	init_logging()?;

	let cli = Cli::parse();
	commands::execute(cli).await
}
