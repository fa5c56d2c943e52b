// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Mapping from the upstream JSON document to [`ImageResult`] records.

use serde::Deserialize;
use serde_json::Value;

use crate::entities::entity_name;
use crate::error::ImageSearchError;
use crate::types::ImageResult;

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
	d: ApiData,
}

#[derive(Debug, Deserialize)]
struct ApiData {
	results: Vec<Value>,
}

/// Builds one record from a result item. Missing fields become empty or 0;
/// a malformed field never discards the item.
fn image_from_item(item: &Value) -> ImageResult {
	let field = |name: &str| item.get(name);
	ImageResult {
		id: scalar_string(field("ID")),
		title: escape_html(&scalar_string(field("Title"))),
		media_url: scalar_string(field("MediaUrl")),
		thumbnail_url: scalar_string(field("Thumbnail").and_then(|t| t.get("MediaUrl"))),
		width: field("Width").map(coerce_int).unwrap_or(0),
		height: field("Height").map(coerce_int).unwrap_or(0),
		content_type: scalar_string(field("ContentType")),
		file_size: field("FileSize").map(coerce_int).unwrap_or(0),
		source_url: scalar_string(field("SourceUrl")),
	}
}

/// String form of a field copied as-is: strings verbatim, numbers in their
/// JSON spelling, `true` as `1`, `false`/null/absent as empty. Arrays and
/// objects keep their JSON text.
fn scalar_string(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
		Some(Value::Bool(true)) => "1".to_string(),
		Some(Value::String(s)) => s.clone(),
		Some(other) => other.to_string(),
	}
}

/// Parses a response body, rejecting anything that is not JSON or decodes
/// to an empty/false-like value.
pub(crate) fn decode_body(body: &str) -> Result<Value, ImageSearchError> {
	let value: Value = serde_json::from_str(body)
		.map_err(|e| ImageSearchError::InvalidResponse(format!("JSON parse error: {e}")))?;

	if is_falsy(&value) {
		return Err(ImageSearchError::InvalidResponse(format!(
			"empty JSON document: {value}"
		)));
	}
	Ok(value)
}

/// Maps `d.results[*]` into normalized records, preserving order.
pub(crate) fn normalize_images(value: &Value) -> Result<Vec<ImageResult>, ImageSearchError> {
	let envelope = ApiEnvelope::deserialize(value).map_err(|e| {
		ImageSearchError::InvalidResponse(format!("unexpected response shape: {e}"))
	})?;
	Ok(envelope.d.results.iter().map(image_from_item).collect())
}

fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty() || s == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(_) => false,
	}
}

/// Replaces every character that has an HTML 4.01 named entity with that
/// entity (`é` becomes `&eacute;`), and `'` with `&#039;`.
///
/// Existing entities are escaped again (`&amp;` becomes `&amp;amp;`).
/// Characters without a named entity pass through unchanged.
pub(crate) fn escape_html(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		if c == '\'' {
			out.push_str("&#039;");
		} else if let Some(name) = entity_name(c) {
			out.push('&');
			out.push_str(name);
			out.push(';');
		} else {
			out.push(c);
		}
	}
	out
}

/// Lenient integer coercion for numeric fields that may arrive as numbers or
/// strings.
///
/// Strings contribute their leading numeric prefix (`"640px"` is 640);
/// anything non-numeric is 0. Fractions are truncated toward zero and
/// out-of-range values saturate.
pub(crate) fn coerce_int(value: &Value) -> i64 {
	match value {
		Value::Bool(b) => i64::from(*b),
		Value::Number(n) => n
			.as_i64()
			.or_else(|| n.as_u64().map(|_| i64::MAX))
			.or_else(|| n.as_f64().map(|f| f as i64))
			.unwrap_or(0),
		Value::String(s) => leading_int(s),
		Value::Null | Value::Array(_) | Value::Object(_) => 0,
	}
}

fn leading_int(s: &str) -> i64 {
	let s = s.trim_start();
	let bytes = s.as_bytes();
	let mut end = 0;

	if matches!(bytes.first(), Some(b'+' | b'-')) {
		end += 1;
	}
	let digits_start = end;
	while end < bytes.len() && bytes[end].is_ascii_digit() {
		end += 1;
	}
	let int_end = end;
	if int_end == digits_start {
		return 0;
	}

	let mut is_float = false;
	if end < bytes.len() && bytes[end] == b'.' {
		let mut frac_end = end + 1;
		while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
			frac_end += 1;
		}
		if frac_end > end + 1 {
			end = frac_end;
			is_float = true;
		}
	}
	if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits = exp_end;
		while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
			exp_end += 1;
		}
		if exp_end > exp_digits {
			end = exp_end;
			is_float = true;
		}
	}

	if is_float {
		return s[..end].parse::<f64>().map(|f| f as i64).unwrap_or(0);
	}
	match s[..int_end].parse::<i64>() {
		Ok(n) => n,
		Err(_) if bytes[0] == b'-' => i64::MIN,
		Err(_) => i64::MAX,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn escape_html_escapes_markup_characters() {
		assert_eq!(
			escape_html(r#"Tom & Jerry <b>"cartoon"</b> 'classic'"#),
			"Tom &amp; Jerry &lt;b&gt;&quot;cartoon&quot;&lt;/b&gt; &#039;classic&#039;"
		);
		assert_eq!(escape_html("&amp;"), "&amp;amp;");
		assert_eq!(escape_html("café ☕"), "caf&eacute; ☕");
	}

	#[test]
	fn escape_html_uses_named_entities_for_non_ascii() {
		assert_eq!(
			escape_html("Café © 2014 – Zürich"),
			"Caf&eacute; &copy; 2014 &ndash; Z&uuml;rich"
		);
		assert_eq!(escape_html("50 € · naïve"), "50 &euro; &middot; na&iuml;ve");
		assert_eq!(escape_html("東京 ✓"), "東京 ✓");
	}

	#[test]
	fn coerce_int_accepts_numbers_and_numeric_strings() {
		assert_eq!(coerce_int(&json!(640)), 640);
		assert_eq!(coerce_int(&json!("480")), 480);
		assert_eq!(coerce_int(&json!(" 12 ")), 12);
		assert_eq!(coerce_int(&json!("-7")), -7);
		assert_eq!(coerce_int(&json!(12.9)), 12);
		assert_eq!(coerce_int(&json!("1.5e3")), 1500);
		assert_eq!(coerce_int(&json!("640px")), 640);
		assert_eq!(coerce_int(&json!(true)), 1);
	}

	#[test]
	fn coerce_int_falls_back_to_zero() {
		assert_eq!(coerce_int(&json!(null)), 0);
		assert_eq!(coerce_int(&json!("")), 0);
		assert_eq!(coerce_int(&json!("abc")), 0);
		assert_eq!(coerce_int(&json!("-")), 0);
		assert_eq!(coerce_int(&json!([1, 2])), 0);
		assert_eq!(coerce_int(&json!({})), 0);
	}

	#[test]
	fn coerce_int_saturates() {
		assert_eq!(coerce_int(&json!("99999999999999999999")), i64::MAX);
		assert_eq!(coerce_int(&json!("-99999999999999999999")), i64::MIN);
		assert_eq!(coerce_int(&json!(u64::MAX)), i64::MAX);
	}

	#[test]
	fn decode_body_rejects_invalid_and_falsy_documents() {
		for body in ["", "{\"d\": {", "not json", "null", "false", "0", "\"\"", "[]"] {
			let err = decode_body(body).unwrap_err();
			assert!(
				matches!(err, ImageSearchError::InvalidResponse(_)),
				"body {body:?} should be rejected"
			);
		}
	}

	#[test]
	fn decode_body_accepts_objects() {
		assert_eq!(decode_body("{}").unwrap(), json!({}));
		assert_eq!(decode_body("[1]").unwrap(), json!([1]));
	}

	#[test]
	fn normalize_fills_missing_optional_fields() {
		let value = json!({
			"d": { "results": [ {
				"ID": "abc",
				"Title": "x",
				"MediaUrl": "http://m",
				"SourceUrl": "http://s"
			} ] }
		});
		let images = normalize_images(&value).unwrap();
		assert_eq!(images.len(), 1);
		assert_eq!(images[0].content_type, "");
		assert_eq!(images[0].thumbnail_url, "");
		assert_eq!(images[0].width, 0);
		assert_eq!(images[0].file_size, 0);
	}

	#[test]
	fn non_string_fields_do_not_drop_items() {
		let value = json!({
			"d": { "results": [
				{ "ID": "first", "Title": "ok", "MediaUrl": "http://m/1", "SourceUrl": "http://s/1" },
				{ "ID": 42, "Title": 7, "MediaUrl": null, "ContentType": false,
				  "Thumbnail": "http://t/2", "SourceUrl": "http://s/2" },
				"not an object"
			] }
		});
		let images = normalize_images(&value).unwrap();

		assert_eq!(images.len(), 3);
		assert_eq!(images[0].id, "first");
		assert_eq!(images[1].id, "42");
		assert_eq!(images[1].title, "7");
		assert_eq!(images[1].media_url, "");
		assert_eq!(images[1].content_type, "");
		assert_eq!(images[1].thumbnail_url, "");
		assert_eq!(images[1].source_url, "http://s/2");
		assert_eq!(images[2].id, "");
		assert_eq!(images[2].width, 0);
	}

	#[test]
	fn scalar_string_spells_scalars() {
		assert_eq!(scalar_string(Some(&json!("x"))), "x");
		assert_eq!(scalar_string(Some(&json!(1.5))), "1.5");
		assert_eq!(scalar_string(Some(&json!(true))), "1");
		assert_eq!(scalar_string(Some(&json!(null))), "");
		assert_eq!(scalar_string(None), "");
		assert_eq!(scalar_string(Some(&json!([1, 2]))), "[1,2]");
	}

	#[test]
	fn normalize_rejects_documents_without_results() {
		let err = normalize_images(&json!({"error": "nope"})).unwrap_err();
		assert!(matches!(err, ImageSearchError::InvalidResponse(_)));
	}

	proptest! {
		/// Escaped output never contains raw markup characters.
		#[test]
		fn escaped_text_has_no_raw_markup(input in "\\PC*") {
			let escaped = escape_html(&input);
			prop_assert!(!escaped.contains('<'));
			prop_assert!(!escaped.contains('>'));
			prop_assert!(!escaped.contains('"'));
			prop_assert!(!escaped.contains('\''));
		}

		/// Decimal strings coerce to the number they spell.
		#[test]
		fn decimal_strings_roundtrip(n in any::<i64>()) {
			prop_assert_eq!(coerce_int(&Value::String(n.to_string())), n);
			prop_assert_eq!(coerce_int(&json!(n)), n);
		}
	}
}
