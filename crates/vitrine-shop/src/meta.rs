//! `<head>` metadata for rendered pages.

use vitrine_pages::html_escape;
use vitrine_urls::Query;

use crate::state::ProductState;
use crate::views::Page;

pub const SITE_NAME: &str = "Shop";
pub const DEFAULT_DESCRIPTION: &str = "The best shopping experience.";
/// Head of every not-found response.
pub const NOT_FOUND_HEAD: &str = "<title>404 - Not Found</title>";

/// Title of a page.
///
/// - detail: `{product title} - Shop`
/// - home with a search: `{search} search results - Shop`
/// - home with a category: `{category1} {category2} - Shop`
/// - otherwise `Shop - Home`
pub fn page_title(page: Page, query: &Query, state: &ProductState) -> String {
	let value = |key: &str| query.get(key).map(String::as_str).filter(|v| !v.is_empty());

	match page {
		Page::ProductDetail => match &state.current_product {
			Some(detail) => format!("{} - {}", detail.product.title, SITE_NAME),
			None => format!("{} - Home", SITE_NAME),
		},
		Page::Home => {
			if let Some(search) = value("search") {
				format!("{} search results - {}", search, SITE_NAME)
			} else if let Some(category1) = value("category1") {
				match value("category2") {
					Some(category2) => format!("{} {} - {}", category1, category2, SITE_NAME),
					None => format!("{} - {}", category1, SITE_NAME),
				}
			} else {
				format!("{} - Home", SITE_NAME)
			}
		}
		Page::NotFound => "404 - Not Found".to_string(),
	}
}

/// Description of a page: the product description on detail pages.
pub fn page_description(page: Page, state: &ProductState) -> String {
	match (page, &state.current_product) {
		(Page::ProductDetail, Some(detail)) if !detail.description.is_empty() => {
			detail.description.clone()
		}
		(Page::ProductDetail, Some(detail)) => {
			format!("{} {}", detail.product.brand, detail.product.title)
		}
		_ => DEFAULT_DESCRIPTION.to_string(),
	}
}

/// Title, description and Open Graph elements.
pub fn head_metadata(page: Page, query: &Query, state: &ProductState) -> String {
	if page == Page::NotFound {
		return NOT_FOUND_HEAD.to_string();
	}
	let title = page_title(page, query, state);
	let description = page_description(page, state);
	let title = html_escape(&title);
	let description = html_escape(&description);
	format!(
		"<title>{title}</title>\
		 <meta name=\"description\" content=\"{description}\">\
		 <meta property=\"og:title\" content=\"{title}\">\
		 <meta property=\"og:description\" content=\"{description}\">"
	)
}
