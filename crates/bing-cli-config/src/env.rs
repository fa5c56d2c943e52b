// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading secrets from `VAR` / `VAR_FILE` environment variables.
//!
//! `VAR_FILE` points at a file holding the secret (Docker and Kubernetes
//! secret mounts) and wins over `VAR` when both are set.

use std::path::PathBuf;
use std::{env, fs};

use bing_common_secret::SecretString;
use thiserror::Error;

/// Environment variable holding the Bing API key.
pub const API_KEY_ENV: &str = "BING_API_KEY";

/// Errors that can occur when loading secrets from environment variables.
#[derive(Debug, Error)]
pub enum SecretEnvError {
	/// Failed to read the secret file.
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The secret file path was empty.
	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load a secret from `{var}_FILE` or `{var}`, in that order.
///
/// A single trailing newline is stripped from file contents. Returns
/// `Ok(None)` when neither variable is set.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(SecretString::new(secret)));
	}

	Ok(env::var(var).ok().map(SecretString::new))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	// Each test uses its own variable name so they can run in parallel.

	#[test]
	fn returns_none_when_not_set() {
		let var = "BING_TEST_UNSET_KEY_1";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn reads_direct_value() {
		let var = "BING_TEST_DIRECT_KEY_2";
		env::remove_var(format!("{var}_FILE"));
		env::set_var(var, "direct-key");

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "direct-key");

		env::remove_var(var);
	}

	#[test]
	fn file_wins_and_trailing_newline_is_stripped() {
		let var = "BING_TEST_FILE_KEY_3";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "file-key").unwrap();

		env::set_var(var, "direct-key");
		env::set_var(format!("{var}_FILE"), file.path());

		let secret = load_secret_env(var).unwrap().unwrap();
		assert_eq!(secret.expose(), "file-key");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let var = "BING_TEST_EMPTY_PATH_4";
		env::set_var(format!("{var}_FILE"), "");

		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::EmptyPath { .. })
		));

		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn unreadable_file_is_an_error() {
		let var = "BING_TEST_MISSING_FILE_5";
		env::set_var(format!("{var}_FILE"), "/nonexistent/bing/key");

		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::Io { .. })
		));

		env::remove_var(format!("{var}_FILE"));
	}
}
