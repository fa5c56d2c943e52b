// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request and result types for Bing image search.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_OPTIONS: &str = "EnableHighlighting";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_ADULT_FILTER: &str = "Off";
pub const DEFAULT_IMAGE_FILTERS: &str = "Size:Large";

/// Body format requested from the API (`$format`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
	#[default]
	Json,
	Xml,
}

impl ResponseFormat {
	pub fn as_str(self) -> &'static str {
		match self {
			ResponseFormat::Json => "json",
			ResponseFormat::Xml => "xml",
		}
	}
}

impl fmt::Display for ResponseFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Shape handed back by [`crate::ImageSearchClient::get_images`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnShape {
	/// One normalized [`ImageResult`] per upstream item.
	#[default]
	Array,
	/// The decoded JSON document, untouched.
	Object,
}

/// Parameters for an image search.
///
/// Every field has a default, so `ImageSearchRequest::default()` is a valid
/// (empty-query) request. Values are stored unquoted; quoting for the
/// upstream query language happens in [`ImageSearchRequest::query_params`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSearchRequest {
	/// Highlighting options, e.g. `EnableHighlighting`.
	pub options: String,
	pub format: ResponseFormat,
	/// Number of results to request (`$top`), at least 1.
	pub max_results: u32,
	/// Adult content filter: `Off`, `Moderate` or `Strict`.
	pub adult_filter: String,
	/// Size/type filter expression, e.g. `Size:Large` or `Style:Photo`.
	pub image_filters: String,
	/// Search text, sent as-is apart from the surrounding quotes.
	pub query: String,
	pub return_shape: ReturnShape,
}

impl Default for ImageSearchRequest {
	fn default() -> Self {
		Self {
			options: DEFAULT_OPTIONS.to_string(),
			format: ResponseFormat::default(),
			max_results: DEFAULT_MAX_RESULTS,
			adult_filter: DEFAULT_ADULT_FILTER.to_string(),
			image_filters: DEFAULT_IMAGE_FILTERS.to_string(),
			query: String::new(),
			return_shape: ReturnShape::default(),
		}
	}
}

impl ImageSearchRequest {
	/// Creates a request for `query` with every other field defaulted.
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			..Self::default()
		}
	}

	pub fn with_options(mut self, options: impl Into<String>) -> Self {
		self.options = options.into();
		self
	}

	pub fn with_format(mut self, format: ResponseFormat) -> Self {
		self.format = format;
		self
	}

	/// Sets `$top`. Zero is raised to 1.
	pub fn with_max_results(mut self, max_results: u32) -> Self {
		self.max_results = max_results.max(1);
		self
	}

	pub fn with_adult_filter(mut self, adult_filter: impl Into<String>) -> Self {
		self.adult_filter = adult_filter.into();
		self
	}

	pub fn with_image_filters(mut self, image_filters: impl Into<String>) -> Self {
		self.image_filters = image_filters.into();
		self
	}

	pub fn with_return_shape(mut self, return_shape: ReturnShape) -> Self {
		self.return_shape = return_shape;
		self
	}

	/// Wire-level query parameters, in the order the API documents them.
	///
	/// `Options`, `Adult`, `ImageFilters` and `Query` are wrapped in single
	/// quotes as the upstream query language expects; `$top` is a bare
	/// integer.
	pub fn query_params(&self) -> Vec<(String, String)> {
		vec![
			("Options".to_string(), quoted(&self.options)),
			("$format".to_string(), self.format.as_str().to_string()),
			("$top".to_string(), self.max_results.max(1).to_string()),
			("Adult".to_string(), quoted(&self.adult_filter)),
			("ImageFilters".to_string(), quoted(&self.image_filters)),
			("Query".to_string(), quoted(&self.query)),
		]
	}
}

fn quoted(value: &str) -> String {
	format!("'{value}'")
}

/// A single normalized image result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
	#[serde(rename = "ID")]
	pub id: String,
	/// HTML-escaped title.
	#[serde(rename = "Title")]
	pub title: String,
	#[serde(rename = "MediaUrl")]
	pub media_url: String,
	#[serde(rename = "ThumbnailUrl")]
	pub thumbnail_url: String,
	#[serde(rename = "Width")]
	pub width: i64,
	#[serde(rename = "Height")]
	pub height: i64,
	/// Empty when the API omits it.
	#[serde(rename = "ContentType")]
	pub content_type: String,
	#[serde(rename = "FileSize")]
	pub file_size: i64,
	#[serde(rename = "SourceUrl")]
	pub source_url: String,
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSearchResponse {
	Images(Vec<ImageResult>),
	Raw(serde_json::Value),
}

impl ImageSearchResponse {
	/// Normalized results, or `None` for a raw response.
	pub fn images(&self) -> Option<&[ImageResult]> {
		match self {
			ImageSearchResponse::Images(images) => Some(images),
			ImageSearchResponse::Raw(_) => None,
		}
	}

	/// Serializes either shape into a JSON value for output.
	pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
		match self {
			ImageSearchResponse::Images(images) => serde_json::to_value(images),
			ImageSearchResponse::Raw(value) => Ok(value.clone()),
		}
	}
}
