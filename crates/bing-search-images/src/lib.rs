// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bing image search API client.
//!
//! This crate provides a typed client for the Bing image search endpoint,
//! building the upstream query string from an [`ImageSearchRequest`] and
//! normalizing each result into an [`ImageResult`]. HTTP is delegated to a
//! [`bing_common_http::HttpTransport`], so any transport can be injected.

pub mod client;
mod entities;
pub mod error;
mod normalize;
pub mod types;

pub use bing_common_http::{HttpTransport, ReqwestTransport, TransportConfig, TransportError};
pub use client::{ImageSearchClient, API_HOST, IMAGE_SEARCH_PATH};
pub use error::ImageSearchError;
pub use types::{ImageResult, ImageSearchRequest, ImageSearchResponse, ResponseFormat, ReturnShape};
