// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! reqwest client construction with a consistent User-Agent header.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::TransportError;

/// Creates a client builder with the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = bing_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a client with the standard User-Agent and the given timeout.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, TransportError> {
	builder()
		.timeout(timeout)
		.build()
		.map_err(|e| TransportError::Client(e.to_string()))
}

/// Returns the User-Agent sent with every request.
///
/// Format: `bing-images/{version}/{os}-{arch}`
pub fn user_agent() -> String {
	format!(
		"bing-images/{}/{}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
