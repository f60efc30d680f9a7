//! Static site generation.
//!
//! Renders the home page and one page per catalog item with an empty query
//! and writes each to `index.html` under a directory mirroring its URL.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};
use vitrine_pages::DocumentTemplate;
use vitrine_urls::Query;

use crate::error::SiteError;
use crate::render::Renderer;

/// One page of the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
	pub url: String,
	/// Path relative to the output directory.
	pub output: PathBuf,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct SiteReport {
	pub written: Vec<PathBuf>,
	pub failed: Vec<(String, SiteError)>,
}

impl SiteReport {
	pub fn is_complete(&self) -> bool {
		self.failed.is_empty()
	}
}

pub struct StaticSite<'a> {
	renderer: &'a Renderer,
	template: &'a DocumentTemplate,
	output_dir: PathBuf,
}

impl<'a> StaticSite<'a> {
	pub fn new(renderer: &'a Renderer, template: &'a DocumentTemplate, output_dir: impl Into<PathBuf>) -> Self {
		Self {
			renderer,
			template,
			output_dir: output_dir.into(),
		}
	}

	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	/// `/` followed by every product page, in catalog order.
	pub fn pages(&self) -> Vec<SitePage> {
		let mut pages = vec![SitePage {
			url: "/".to_string(),
			output: PathBuf::from("index.html"),
		}];
		pages.extend(self.renderer.catalog().items().iter().map(|item| SitePage {
			url: format!("/product/{}/", item.product_id),
			output: Path::new("product").join(&item.product_id).join("index.html"),
		}));
		pages
	}

	/// Writes every page. A page that fails is logged and skipped.
	pub fn generate(&self) -> SiteReport {
		let mut report = SiteReport::default();
		for page in self.pages() {
			match self.write_page(&page) {
				Ok(path) => {
					info!(url = %page.url, path = %path.display(), "page generated");
					report.written.push(path);
				}
				Err(err) => {
					error!(url = %page.url, error = %err, "page generation failed");
					report.failed.push((page.url, err));
				}
			}
		}
		report
	}

	pub fn write_page(&self, page: &SitePage) -> Result<PathBuf, SiteError> {
		if !is_safe_relative(&page.output) {
			return Err(SiteError::UnsafePath(page.output.clone()));
		}
		let output = self
			.renderer
			.render(&page.url, &Query::new())
			.map_err(|source| SiteError::Render {
				url: page.url.clone(),
				source,
			})?;
		let html = self.template.assemble(&output);

		let path = self.output_dir.join(&page.output);
		let io_error = |source| SiteError::Io {
			path: path.clone(),
			source,
		};
		if let Some(dir) = path.parent() {
			fs::create_dir_all(dir).map_err(io_error)?;
		}
		fs::write(&path, html).map_err(io_error)?;
		Ok(path)
	}
}

/// Product ids become directory names; only plain components are allowed.
fn is_safe_relative(path: &Path) -> bool {
	use std::path::Component;

	path.components().all(|component| matches!(component, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{Catalog, Product};
	use rstest::rstest;
	use std::sync::Arc;

	fn renderer(ids: &[&str]) -> Renderer {
		let items = ids
			.iter()
			.map(|id| Product {
				product_id: id.to_string(),
				title: format!("Item {}", id),
				..Product::default()
			})
			.collect();
		Renderer::new(Arc::new(Catalog::new(items)))
	}

	#[rstest]
	fn test_pages_cover_home_and_products() {
		// Arrange
		let renderer = renderer(&["1", "2"]);
		let template = DocumentTemplate::new("<!--app-html-->");
		let site = StaticSite::new(&renderer, &template, "dist");

		// Act
		let pages = site.pages();

		// Assert
		let urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
		assert_eq!(urls, vec!["/", "/product/1/", "/product/2/"]);
		assert_eq!(pages[2].output, Path::new("product/2/index.html"));
	}

	#[rstest]
	fn test_unsafe_product_id_is_skipped() {
		// Arrange
		let dir = tempfile::tempdir().unwrap();
		let renderer = renderer(&["1", "../escape"]);
		let template = DocumentTemplate::new("<!--app-html-->");
		let site = StaticSite::new(&renderer, &template, dir.path());

		// Act
		let report = site.generate();

		// Assert
		assert_eq!(report.written.len(), 2);
		assert_eq!(report.failed.len(), 1);
		assert_eq!(report.failed[0].0, "/product/../escape/");
		assert!(!dir.path().parent().unwrap().join("escape").exists());
	}
}
