//! Server render output and markup helpers.

use std::borrow::Cow;

/// What one server render produces.
///
/// The three parts are spliced into the page template by
/// [`DocumentTemplate::assemble`](crate::DocumentTemplate::assemble).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
	/// Body markup for the application root.
	pub markup: String,
	/// Elements for `<head>`: title, description, Open Graph tags.
	pub head_metadata: String,
	/// The initial-data `<script>`; empty when nothing is handed to the client.
	pub hydration_script: String,
}

impl RenderOutput {
	pub fn new(
		markup: impl Into<String>,
		head_metadata: impl Into<String>,
		hydration_script: impl Into<String>,
	) -> Self {
		Self {
			markup: markup.into(),
			head_metadata: head_metadata.into(),
			hydration_script: hydration_script.into(),
		}
	}

	pub fn has_hydration_data(&self) -> bool {
		!self.hydration_script.is_empty()
	}
}

/// Escapes HTML special characters in a string.
///
/// This function replaces the following characters:
/// - `&` → `&amp;`
/// - `<` → `&lt;`
/// - `>` → `&gt;`
/// - `"` → `&quot;`
/// - `'` → `&#x27;`
///
/// Returns a borrowed reference if no escaping is needed,
/// or an owned string if any characters were escaped.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Lamp", "Lamp")]
	#[case("<b>", "&lt;b&gt;")]
	#[case("Tom & \"Jerry's\"", "Tom &amp; &quot;Jerry&#x27;s&quot;")]
	fn test_html_escape(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}

	#[rstest]
	fn test_html_escape_borrows_when_clean() {
		assert!(matches!(html_escape("plain text"), Cow::Borrowed(_)));
	}

	#[rstest]
	fn test_has_hydration_data() {
		assert!(!RenderOutput::new("<p>404</p>", "<title>404 - Not Found</title>", "").has_hydration_data());
	}
}
