// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Effective runtime configuration.

use std::path::{Path, PathBuf};

use bing_common_secret::SecretString;
use bing_search_images::ImageSearchRequest;
use serde::{Deserialize, Serialize};

use crate::env::{load_secret_env, API_KEY_ENV};
use crate::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bing account key. Serialized as `[REDACTED]`.
	pub key: Option<SecretString>,
	/// Overrides scheme and host of every request, e.g. a local proxy.
	pub base_url: Option<String>,
	/// Permit an `http://` `base_url`. The key is then sent unencrypted.
	pub allow_cleartext: bool,
	pub timeout_secs: u64,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			key: None,
			base_url: None,
			allow_cleartext: false,
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}
}

/// Full configuration: `[api]` plus `[search]` request defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BingConfig {
	pub api: ApiConfig,
	/// Defaults for every search; CLI flags override field by field.
	pub search: ImageSearchRequest,
}

impl BingConfig {
	/// Parse a TOML document.
	pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
		toml::from_str(content).map_err(|source| ConfigError::TomlParse {
			path: origin.to_path_buf(),
			source,
		})
	}

	/// Read and parse a TOML file.
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content, path)
	}

	/// Reject values the API or transport cannot use.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.api.timeout_secs == 0 {
			return Err(ConfigError::invalid_value(
				"api.timeout_secs",
				"must be greater than zero",
			));
		}
		if self.search.max_results == 0 {
			return Err(ConfigError::invalid_value(
				"search.max_results",
				"must be at least 1",
			));
		}
		if let Some(base_url) = &self.api.base_url {
			if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
				return Err(ConfigError::invalid_value(
					"api.base_url",
					format!("expected an http(s) URL, got {base_url}"),
				));
			}
		}
		Ok(())
	}

	/// The API key, or an empty key when none is configured.
	pub fn api_key(&self) -> SecretString {
		self.api.key.clone().unwrap_or_default()
	}
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub api_key: Option<SecretString>,
}

/// Load configuration without command-line overrides.
///
/// Precedence, lowest first: built-in defaults, the config file (the
/// explicit `path` if given, otherwise the user file when it exists), then
/// `BING_API_KEY` / `BING_API_KEY_FILE` for the key.
pub fn load_config(path: Option<&Path>) -> Result<BingConfig, ConfigError> {
	load_config_with_cli(path, CliOverrides::default())
}

/// Load configuration, then apply `cli`.
///
/// When `cli.api_key` is set the key environment variables are not read at
/// all, so a broken `BING_API_KEY_FILE` cannot block an explicit key.
pub fn load_config_with_cli(
	path: Option<&Path>,
	cli: CliOverrides,
) -> Result<BingConfig, ConfigError> {
	load_config_from(path, cli, API_KEY_ENV)
}

fn load_config_from(
	path: Option<&Path>,
	cli: CliOverrides,
	key_var: &str,
) -> Result<BingConfig, ConfigError> {
	let mut config = match path {
		Some(path) => BingConfig::from_file(path)?,
		None => {
			let user_file: PathBuf = crate::paths::user_config_file()?;
			if user_file.exists() {
				BingConfig::from_file(&user_file)?
			} else {
				tracing::debug!(path = %user_file.display(), "no user config file, using defaults");
				BingConfig::default()
			}
		}
	};

	if let Some(key) = cli.api_key {
		tracing::debug!("API key taken from command line");
		config.api.key = Some(key);
	} else if let Some(key) = load_secret_env(key_var)? {
		tracing::debug!(var = key_var, "API key taken from environment");
		config.api.key = Some(key);
	}

	config.validate()?;
	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use bing_search_images::{ResponseFormat, ReturnShape};
	use proptest::prelude::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn empty_document_yields_defaults() {
		let config = BingConfig::from_toml_str("", Path::new("inline")).unwrap();
		assert_eq!(config, BingConfig::default());
		assert_eq!(config.api.timeout_secs, 30);
		assert_eq!(config.search, ImageSearchRequest::default());
		assert!(config.api_key().is_empty());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let toml = r#"
			[api]
			key = "abc123"

			[search]
			max_results = 25
			adult_filter = "Strict"
			format = "xml"
			return_shape = "object"
		"#;
		let config = BingConfig::from_toml_str(toml, Path::new("inline")).unwrap();

		assert_eq!(config.api_key().expose(), "abc123");
		assert_eq!(config.api.timeout_secs, 30);
		assert_eq!(config.search.max_results, 25);
		assert_eq!(config.search.adult_filter, "Strict");
		assert_eq!(config.search.format, ResponseFormat::Xml);
		assert_eq!(config.search.return_shape, ReturnShape::Object);
		assert_eq!(config.search.image_filters, "Size:Large");
	}

	#[test]
	fn bad_toml_reports_path() {
		let err = BingConfig::from_toml_str("[api\nkey=", Path::new("/tmp/x.toml")).unwrap_err();
		assert!(err.to_string().contains("/tmp/x.toml"));
	}

	#[test]
	fn unknown_enum_value_is_rejected() {
		let result = BingConfig::from_toml_str("[search]\nformat = \"yaml\"", Path::new("inline"));
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn validate_rejects_zero_timeout_and_results() {
		let mut config = BingConfig::default();
		config.api.timeout_secs = 0;
		assert!(config.validate().is_err());

		let mut config = BingConfig::default();
		config.search.max_results = 0;
		assert!(config.validate().is_err());
	}

	#[test]
	fn validate_rejects_non_http_base_url() {
		let mut config = BingConfig::default();
		config.api.base_url = Some("ftp://proxy".to_string());
		assert!(config.validate().is_err());

		config.api.base_url = Some("http://127.0.0.1:8080".to_string());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn serialized_config_redacts_key() {
		let mut config = BingConfig::default();
		config.api.key = Some(SecretString::from("abc123"));
		let rendered = toml::to_string(&config).unwrap();
		assert!(!rendered.contains("abc123"));
		assert!(rendered.contains("[REDACTED]"));
	}

	#[test]
	fn load_config_reads_explicit_file() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[search]\nquery = \"lighthouse\"").unwrap();

		let config = load_config(Some(file.path())).unwrap();
		assert_eq!(config.search.query, "lighthouse");
	}

	#[test]
	fn load_config_missing_explicit_file_is_io_error() {
		let result = load_config(Some(Path::new("/nonexistent/bing-images.toml")));
		assert!(matches!(result, Err(ConfigError::Io { .. })));
	}

	#[test]
	fn cli_key_skips_broken_key_file() {
		let var = "BING_TEST_CLI_KEY_6";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[api]\nkey = \"from-file\"").unwrap();
		std::env::remove_var(var);
		std::env::set_var(format!("{var}_FILE"), "/nonexistent/bing/key");

		let cli = CliOverrides {
			api_key: Some(SecretString::from("from-flag")),
		};
		let config = load_config_from(Some(file.path()), cli, var).unwrap();
		assert_eq!(config.api_key().expose(), "from-flag");

		let result = load_config_from(Some(file.path()), CliOverrides::default(), var);
		assert!(matches!(result, Err(ConfigError::SecretEnv(_))));

		std::env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn env_key_overrides_file_key_without_cli() {
		let var = "BING_TEST_ENV_KEY_7";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "[api]\nkey = \"from-file\"").unwrap();
		std::env::remove_var(format!("{var}_FILE"));
		std::env::set_var(var, "from-env");

		let config = load_config_from(Some(file.path()), CliOverrides::default(), var).unwrap();
		assert_eq!(config.api_key().expose(), "from-env");

		std::env::remove_var(var);
	}

	#[test]
	fn allow_cleartext_defaults_off() {
		assert!(!BingConfig::default().api.allow_cleartext);
		let config =
			BingConfig::from_toml_str("[api]\nallow_cleartext = true", Path::new("inline")).unwrap();
		assert!(config.api.allow_cleartext);
	}

	proptest! {
		/// Any positive timeout and result count passes validation.
		#[test]
		fn positive_values_validate(timeout in 1u64..10_000, max in 1u32..1000) {
			let mut config = BingConfig::default();
			config.api.timeout_secs = timeout;
			config.search.max_results = max;
			prop_assert!(config.validate().is_ok());
		}
	}
}
