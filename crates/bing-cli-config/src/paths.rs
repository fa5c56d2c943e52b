// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

const APP_DIR: &str = "bing-images";

/// Resolve the user config file: `$XDG_CONFIG_HOME/bing-images/config.toml`,
/// falling back to `~/.config/bing-images/config.toml`.
pub fn user_config_file() -> Result<PathBuf, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
		Some(dir) if !dir.is_empty() => PathBuf::from(dir),
		_ => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	let path = config_home.join(APP_DIR).join("config.toml");
	tracing::debug!(path = %path.display(), "resolved user config path");
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_config_file_ends_with_app_dir() {
		let path = user_config_file().unwrap();
		assert!(path.ends_with("bing-images/config.toml"));
	}
}
