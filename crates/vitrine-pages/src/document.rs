//! The HTML shell a server render is spliced into.

use std::io;
use std::path::Path;

use tracing::warn;

use crate::ssr::RenderOutput;

/// Replaced with [`RenderOutput::head_metadata`].
pub const HEAD_MARKER: &str = "<!--app-head-->";
/// Replaced with [`RenderOutput::markup`].
pub const HTML_MARKER: &str = "<!--app-html-->";

const HEAD_CLOSE: &str = "</head>";

/// A page template containing the head and body markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
	source: String,
}

impl DocumentTemplate {
	pub fn new(source: impl Into<String>) -> Self {
		let source = source.into();
		if !source.contains(HTML_MARKER) {
			warn!(marker = HTML_MARKER, "template has no body marker");
		}
		Self { source }
	}

	pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
		Ok(Self::new(std::fs::read_to_string(path)?))
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	/// Produces the final document.
	///
	/// The markers are replaced first and the hydration script goes in
	/// immediately before `</head>`, so markup that happens to contain a
	/// marker is never re-expanded.
	///
	/// # Example
	///
	/// ```
	/// use vitrine_pages::{DocumentTemplate, RenderOutput};
	///
	/// let template = DocumentTemplate::new(
	///     "<html><head><!--app-head--></head><body><!--app-html--></body></html>",
	/// );
	/// let html = template.assemble(&RenderOutput::new("<main></main>", "<title>Shop</title>", ""));
	/// assert_eq!(
	///     html,
	///     "<html><head><title>Shop</title></head><body><main></main></body></html>"
	/// );
	/// ```
	pub fn assemble(&self, output: &RenderOutput) -> String {
		let mut document = String::with_capacity(
			self.source.len()
				+ output.markup.len()
				+ output.head_metadata.len()
				+ output.hydration_script.len(),
		);
		let mut rest = self.source.as_str();
		let mut script_pending = output.has_hydration_data();

		while let Some((index, kind)) = next_marker(rest) {
			let (before, after) = rest.split_at(index);
			document.push_str(before);
			match kind {
				Marker::Head => {
					document.push_str(&output.head_metadata);
					rest = &after[HEAD_MARKER.len()..];
				}
				Marker::Html => {
					document.push_str(&output.markup);
					rest = &after[HTML_MARKER.len()..];
				}
				Marker::HeadClose => {
					if script_pending {
						document.push_str(&output.hydration_script);
						script_pending = false;
					}
					document.push_str(HEAD_CLOSE);
					rest = &after[HEAD_CLOSE.len()..];
				}
			}
		}
		document.push_str(rest);
		document
	}
}

#[derive(Debug, Clone, Copy)]
enum Marker {
	Head,
	Html,
	HeadClose,
}

fn next_marker(text: &str) -> Option<(usize, Marker)> {
	[
		(HEAD_MARKER, Marker::Head),
		(HTML_MARKER, Marker::Html),
		(HEAD_CLOSE, Marker::HeadClose),
	]
	.into_iter()
	.filter_map(|(needle, kind)| text.find(needle).map(|index| (index, kind)))
	.min_by_key(|(index, _)| *index)
}
