// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The transport seam API clients talk through, plus its reqwest default.

use std::time::Duration;

use async_trait::async_trait;
use bing_common_secret::SecretString;
use reqwest::Client;
use tracing::{debug, error, trace, warn};

use crate::TransportError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings handed to a transport before each request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
	/// Host name, optionally with a port (`api.example.com`, `127.0.0.1:8080`).
	pub host: String,
	/// Credential in `user:password` form, sent as HTTP Basic auth.
	pub http_auth: Option<SecretString>,
	/// Require `https`.
	pub use_ssl: bool,
}

/// Minimal HTTP capability set an API client needs.
///
/// Implementations decide how requests are carried out (TLS, pooling,
/// timeouts); callers only configure, build a URL and GET.
#[async_trait]
pub trait HttpTransport: Send + Sync {
	/// Replace the connection settings used by later calls.
	fn configure(&mut self, config: TransportConfig);

	/// Resolve a resource path against the configured host.
	fn build_url(&self, path: &str) -> Result<String, TransportError>;

	/// Perform a GET with the given query parameters and return the body.
	async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String, TransportError>;
}

/// Splits a `user:password` credential at the first colon.
///
/// A credential without a colon is treated as a bare user name.
pub fn split_userpwd(userpwd: &str) -> (&str, Option<&str>) {
	match userpwd.split_once(':') {
		Some((user, password)) => (user, Some(password)),
		None => (userpwd, None),
	}
}

/// Default [`HttpTransport`] backed by reqwest with rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	http_client: Client,
	config: TransportConfig,
	base_url: Option<String>,
	allow_cleartext: bool,
}

impl ReqwestTransport {
	/// Creates a transport with the default 30 second request timeout.
	pub fn new() -> Result<Self, TransportError> {
		Self::with_timeout(DEFAULT_TIMEOUT)
	}

	/// Creates a transport with a custom request timeout.
	pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
		Ok(Self {
			http_client: crate::new_client_with_timeout(timeout)?,
			config: TransportConfig::default(),
			base_url: None,
			allow_cleartext: false,
		})
	}

	/// Pins scheme and host to `base_url`, ignoring the configured host.
	///
	/// Useful for testing against a local server or routing through a proxy.
	/// While the configuration asks for `use_ssl`, an `http://` base URL is
	/// rejected unless [`Self::allow_cleartext`] was called.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	/// Permits a plain `http://` base URL even when `use_ssl` is set.
	///
	/// Credentials are then sent unencrypted.
	pub fn allow_cleartext(mut self) -> Self {
		self.allow_cleartext = true;
		self
	}

	/// Settings from the most recent `configure` call.
	pub fn config(&self) -> &TransportConfig {
		&self.config
	}

	fn origin(&self) -> Result<String, TransportError> {
		if let Some(base_url) = &self.base_url {
			let secure = base_url
				.get(..8)
				.is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"));
			if self.config.use_ssl && !secure {
				if !self.allow_cleartext {
					error!(base_url = %base_url, "Refusing cleartext base URL while use_ssl is set");
					return Err(TransportError::InsecureBaseUrl(base_url.clone()));
				}
				warn!(base_url = %base_url, "Sending credentials over a cleartext base URL");
			}
			return Ok(base_url.trim_end_matches('/').to_string());
		}
		if self.config.host.is_empty() {
			return Err(TransportError::NotConfigured);
		}
		let scheme = if self.config.use_ssl { "https" } else { "http" };
		Ok(format!(
			"{scheme}://{}",
			self.config.host.trim_end_matches('/')
		))
	}
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
	fn configure(&mut self, config: TransportConfig) {
		trace!(host = %config.host, use_ssl = config.use_ssl, "Configuring transport");
		self.config = config;
	}

	fn build_url(&self, path: &str) -> Result<String, TransportError> {
		Ok(format!("{}/{}", self.origin()?, path.trim_start_matches('/')))
	}

	async fn get(&self, url: &str, params: &[(String, String)]) -> Result<String, TransportError> {
		debug!(url = %url, param_count = params.len(), "Sending GET request");

		let mut request = self.http_client.get(url).query(params);
		if let Some(auth) = &self.config.http_auth {
			let (user, password) = split_userpwd(auth.expose());
			request = request.basic_auth(user, password);
		}

		let response = request.send().await.map_err(|e| {
			if e.is_timeout() {
				error!("Request timed out");
				return TransportError::Timeout;
			}
			error!(error = %e, "Network error during GET request");
			TransportError::Network(e)
		})?;

		let status = response.status();
		debug!(status = %status, "Received response");

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			error!(status = status.as_u16(), body = %body, "Non-success HTTP status");
			return Err(TransportError::Status {
				status: status.as_u16(),
				body,
			});
		}

		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read response body");
			TransportError::Network(e)
		})?;
		trace!(bytes = body.len(), "Read response body");

		Ok(body)
	}
}
