// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Bing image search client.

use bing_common_http::TransportError;
use thiserror::Error;

/// Errors that can occur when searching for images.
#[derive(Debug, Error)]
pub enum ImageSearchError {
	/// The transport failed; passed through untouched.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Body was not usable JSON, or lacked the result list.
	#[error("Invalid response from Bing: {0}")]
	InvalidResponse(String),
}
