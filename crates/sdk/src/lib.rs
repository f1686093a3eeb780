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

//! Panda SDK - Client library for the Panda video encoding API
//!
//! This crate provides request signing, a signed HTTP client, typed endpoint
//! wrappers for videos, encodings, profiles, clouds and notifications, and the
//! models those endpoints exchange.
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No global state; a [`Signer`] is an explicit value
//! - Configuration is loaded only when the caller asks for it

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod signing;

pub use api::{Api, EncodeOptions, EncodingFilter, ProfileRef};
pub use client::{Client, ClientOptions, SyncClient};
pub use config::{ConfigError, PandaConfig};
pub use error::PandaError;
pub use models::{
	Cloud, Encoding, Model, ModelError, NotificationEvents, Notifications, Profile,
	UploadSession, Video, VideoPage,
};
pub use signing::{Credentials, Params, Signer};
