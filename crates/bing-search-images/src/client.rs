// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bing image search client implementation.

use bing_common_http::{HttpTransport, ReqwestTransport, TransportConfig};
use bing_common_secret::SecretString;
use tracing::{debug, error, instrument, trace};

use crate::error::ImageSearchError;
use crate::normalize::{decode_body, normalize_images};
use crate::types::{ImageSearchRequest, ImageSearchResponse, ReturnShape};

/// Host serving the Bing search API.
pub const API_HOST: &str = "api.datamarket.azure.com";

/// Resource path of the image search endpoint.
pub const IMAGE_SEARCH_PATH: &str = "Data.ashx/Bing/Search/v1/Image";

/// Client for the Bing image search API.
///
/// Owns its transport exclusively; use one client per concurrent caller.
pub struct ImageSearchClient {
	api_key: SecretString,
	transport: Box<dyn HttpTransport>,
}

impl std::fmt::Debug for ImageSearchClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ImageSearchClient")
			.field("api_key", &self.api_key)
			.finish_non_exhaustive()
	}
}

impl ImageSearchClient {
	/// Creates a client backed by the default [`ReqwestTransport`].
	pub fn new(api_key: impl Into<SecretString>) -> Result<Self, ImageSearchError> {
		let transport = ReqwestTransport::new()?;
		Ok(Self::with_transport(api_key, Box::new(transport)))
	}

	/// Creates a client that sends requests through `transport`.
	pub fn with_transport(
		api_key: impl Into<SecretString>,
		transport: Box<dyn HttpTransport>,
	) -> Self {
		Self {
			api_key: api_key.into(),
			transport,
		}
	}

	/// Replaces the transport used by later searches.
	pub fn set_transport(&mut self, transport: Box<dyn HttpTransport>) {
		self.transport = transport;
	}

	/// Connection settings sent to the transport before every search.
	///
	/// The API key is used as both user name and password.
	pub fn transport_config(&self) -> TransportConfig {
		let key = self.api_key.expose();
		TransportConfig {
			host: API_HOST.to_string(),
			http_auth: Some(SecretString::new(format!("{key}:{key}"))),
			use_ssl: true,
		}
	}

	/// Searches for images.
	///
	/// Returns normalized [`crate::ImageResult`]s in API order, or the decoded
	/// document when `request.return_shape` is [`ReturnShape::Object`].
	/// Transport errors pass through unchanged; an unusable body yields
	/// [`ImageSearchError::InvalidResponse`] and no partial data.
	#[instrument(skip(self, request), fields(query = %request.query, max_results = request.max_results))]
	pub async fn get_images(
		&mut self,
		request: &ImageSearchRequest,
	) -> Result<ImageSearchResponse, ImageSearchError> {
		if self.api_key.is_empty() {
			debug!("Searching with an empty API key");
		}

		self.transport.configure(self.transport_config());
		let url = self.transport.build_url(IMAGE_SEARCH_PATH)?;
		let params = request.query_params();

		debug!(url = %url, "Sending image search request to Bing");
		trace!(params = ?params, "Search parameters");

		let body = self.transport.get(&url, &params).await?;
		trace!(body = %body, "Response body");

		let value = decode_body(&body).inspect_err(|e| {
			error!(error = %e, "Failed to decode Bing response");
		})?;

		if request.return_shape == ReturnShape::Object {
			debug!("Returning raw response object");
			return Ok(ImageSearchResponse::Raw(value));
		}

		let images = normalize_images(&value).inspect_err(|e| {
			error!(error = %e, "Bing response has no result list");
		})?;

		debug!(result_count = images.len(), "Image search completed successfully");
		Ok(ImageSearchResponse::Images(images))
	}
}
