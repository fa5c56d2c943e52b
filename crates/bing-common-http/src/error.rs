// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Transport-level error types.

use thiserror::Error;

/// Errors raised by an [`crate::HttpTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
	/// `build_url` or `get` was called before `configure`.
	#[error("Transport has no host configured")]
	NotConfigured,

	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Server answered with a non-success status.
	#[error("HTTP error: {status} - {body}")]
	Status { status: u16, body: String },

	/// A base URL would carry credentials over plain HTTP while `use_ssl` is set.
	#[error("Refusing cleartext base URL {0} while use_ssl is set")]
	InsecureBaseUrl(String),

	/// The underlying HTTP client could not be built.
	#[error("Failed to build HTTP client: {0}")]
	Client(String),
}

impl TransportError {
	/// HTTP status code carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			TransportError::Status { status, .. } => Some(*status),
			TransportError::Network(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_is_exposed_for_status_errors() {
		let err = TransportError::Status {
			status: 401,
			body: "denied".to_string(),
		};
		assert_eq!(err.status(), Some(401));
		assert_eq!(err.to_string(), "HTTP error: 401 - denied");
	}

	#[test]
	fn status_is_none_otherwise() {
		assert_eq!(TransportError::Timeout.status(), None);
		assert_eq!(TransportError::NotConfigured.status(), None);
		assert_eq!(
			TransportError::InsecureBaseUrl("http://x".to_string()).status(),
			None
		);
	}
}
