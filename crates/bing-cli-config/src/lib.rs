// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the bing-images CLI.
//!
//! This crate provides:
//! - XDG Base Directory compliant config path resolution
//! - TOML configuration file parsing into [`BingConfig`]
//! - `BING_API_KEY` / `BING_API_KEY_FILE` overrides for the API key
//! - Configuration validation

pub mod env;
pub mod error;
pub mod paths;
pub mod runtime;

pub use env::{load_secret_env, SecretEnvError, API_KEY_ENV};
pub use error::ConfigError;
pub use runtime::{load_config, load_config_with_cli, ApiConfig, BingConfig, CliOverrides};
