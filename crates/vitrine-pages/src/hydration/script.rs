//! Server side of the hydration bridge.

use serde::Serialize;

use super::INITIAL_DATA_VAR;
use crate::error::{HydrationError, HydrationResult};

const ASSIGNMENT_SUFFIX: &str = ";</script>";

/// Renders the `<script>` element that carries the initial data.
pub struct HydrationScript;

impl HydrationScript {
	/// Serializes `payload` into `<script>window.__INITIAL_DATA__ = …;</script>`.
	///
	/// `<`, `>`, `&` and the JavaScript line separators are written as
	/// `\uXXXX` escapes, so no string in the payload can close the element.
	///
	/// # Example
	///
	/// ```
	/// use vitrine_pages::HydrationScript;
	///
	/// let script = HydrationScript::render(&serde_json::json!({"title": "</script>"})).unwrap();
	/// assert_eq!(
	///     script,
	///     r#"<script>window.__INITIAL_DATA__ = {"title":"\u003c/script\u003e"};</script>"#
	/// );
	/// ```
	pub fn render<T: Serialize + ?Sized>(payload: &T) -> HydrationResult<String> {
		let json = serde_json::to_string(payload).map_err(HydrationError::Serialize)?;
		Ok(format!(
			"<script>window.{} = {}{}",
			INITIAL_DATA_VAR,
			escape_for_script(&json),
			ASSIGNMENT_SUFFIX
		))
	}

	/// Pulls the payload back out of a rendered document.
	///
	/// Returns `Ok(None)` when the document carries no payload.
	pub fn extract(document: &str) -> HydrationResult<Option<serde_json::Value>> {
		let marker = format!("window.{} = ", INITIAL_DATA_VAR);
		let Some(start) = document.find(&marker).map(|index| index + marker.len()) else {
			return Ok(None);
		};
		let Some(length) = document[start..].find(ASSIGNMENT_SUFFIX) else {
			return Ok(None);
		};
		serde_json::from_str(&document[start..start + length])
			.map(Some)
			.map_err(HydrationError::Deserialize)
	}
}

fn escape_for_script(json: &str) -> String {
	let mut escaped = String::with_capacity(json.len());
	for c in json.chars() {
		match c {
			'<' => escaped.push_str("\\u003c"),
			'>' => escaped.push_str("\\u003e"),
			'&' => escaped.push_str("\\u0026"),
			'\u{2028}' => escaped.push_str("\\u2028"),
			'\u{2029}' => escaped.push_str("\\u2029"),
			_ => escaped.push(c),
		}
	}
	escaped
}
