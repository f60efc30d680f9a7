//! Storefront errors.

use std::path::PathBuf;

use thiserror::Error;
use vitrine_pages::HydrationError;

/// Failure while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
	#[error("Failed to read catalog '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid catalog data: {0}")]
	Json(#[from] serde_json::Error),
}

/// Failure of a server render.
///
/// A missing route or product is not a failure; it renders the not-found page.
#[derive(Debug, Error)]
pub enum RenderError {
	#[error("Failed to embed initial data: {0}")]
	Hydration(#[from] HydrationError),
}

/// Failure while writing one statically generated page.
#[derive(Debug, Error)]
pub enum SiteError {
	#[error("Render failed for '{url}': {source}")]
	Render {
		url: String,
		#[source]
		source: RenderError,
	},

	#[error("Refusing to write outside the output directory: '{}'", .0.display())]
	UnsafePath(PathBuf),

	#[error("Failed to write '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type CatalogResult<T> = Result<T, CatalogError>;
pub type RenderResult<T> = Result<T, RenderError>;
