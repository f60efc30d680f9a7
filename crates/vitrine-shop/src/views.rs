//! Storefront pages.
//!
//! Each page renders from the store state and the render context alone.
//! Internal links carry the `data-link` marker so a client session handles
//! them without a full page load.

use std::fmt::Write;

use vitrine_pages::{LINK_MARKER, RenderContext, html_escape};
use vitrine_urls::{Query, stringify_query};

use crate::catalog::Product;
use crate::state::ProductState;

/// Route handlers of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
	Home,
	ProductDetail,
	NotFound,
}

impl Page {
	/// Renders the page body. `base` is the public mount path without a
	/// trailing slash.
	pub fn render(self, state: &ProductState, ctx: &RenderContext, base: &str) -> String {
		match self {
			Self::Home => home(state, ctx, base),
			Self::ProductDetail => product_detail(state, ctx, base),
			Self::NotFound => not_found(base),
		}
	}
}

fn link(base: &str, path: &str, query: &Query) -> String {
	let encoded = stringify_query(query);
	if encoded.is_empty() {
		format!("{}{}", base, path)
	} else {
		format!("{}{}?{}", base, path, encoded)
	}
}

fn product_card(out: &mut String, product: &Product, base: &str) {
	let href = link(base, &format!("/product/{}/", product.product_id), &Query::new());
	let _ = write!(
		out,
		"<li class=\"product-card\" data-product-id=\"{id}\">\
		 <a href=\"{href}\" {marker}><img src=\"{image}\" alt=\"{title}\">\
		 <h3>{title}</h3><p class=\"brand\">{brand}</p><p class=\"price\">{price}</p></a></li>",
		id = html_escape(&product.product_id),
		href = html_escape(&href),
		marker = LINK_MARKER,
		image = html_escape(&product.image),
		title = html_escape(&product.title),
		brand = html_escape(&product.brand),
		price = html_escape(&product.lprice),
	);
}

fn home(state: &ProductState, ctx: &RenderContext, base: &str) -> String {
	let search = ctx.query_value("search").unwrap_or_default();
	let selected = ctx.query_value("category1").unwrap_or_default();
	let mut out = String::from("<main class=\"home\">");

	let _ = write!(
		out,
		"<form class=\"search\" action=\"{}/\" method=\"get\">\
		 <input type=\"search\" name=\"search\" value=\"{}\" placeholder=\"Search products\"></form>",
		html_escape(base),
		html_escape(search),
	);

	out.push_str("<nav class=\"categories\">");
	for (category1, children) in &state.categories {
		let mut query = Query::new();
		query.insert("category1".to_string(), category1.clone());
		let class = if category1 == selected { " class=\"active\"" } else { "" };
		let _ = write!(
			out,
			"<a href=\"{}\"{} {}>{}</a>",
			html_escape(&link(base, "/", &query)),
			class,
			LINK_MARKER,
			html_escape(category1),
		);
		if category1 == selected {
			for category2 in children.keys() {
				query.insert("category2".to_string(), category2.clone());
				let _ = write!(
					out,
					"<a class=\"sub\" href=\"{}\" {}>{}</a>",
					html_escape(&link(base, "/", &query)),
					LINK_MARKER,
					html_escape(category2),
				);
			}
		}
	}
	out.push_str("</nav>");

	if let Some(error) = &state.error {
		let _ = write!(out, "<p class=\"error\">{}</p>", html_escape(error));
	}
	let _ = write!(out, "<p class=\"total\">{} products</p>", state.total_count);

	out.push_str("<ul class=\"products\">");
	for product in &state.products {
		product_card(&mut out, product, base);
	}
	out.push_str("</ul>");

	if state.loading {
		out.push_str("<p class=\"loading\">Loading...</p>");
	}
	out.push_str("</main>");
	out
}

fn product_detail(state: &ProductState, ctx: &RenderContext, base: &str) -> String {
	let id = ctx.param("id").unwrap_or_default();
	let Some(detail) = &state.current_product else {
		let status = match &state.error {
			Some(error) => format!("<p class=\"error\">{}</p>", html_escape(error)),
			None => "<p class=\"loading\">Loading...</p>".to_string(),
		};
		return format!(
			"<main class=\"product-detail\" data-product-id=\"{}\">{}</main>",
			html_escape(id),
			status
		);
	};
	let product = &detail.product;
	let mut out = format!(
		"<main class=\"product-detail\" data-product-id=\"{}\">",
		html_escape(id)
	);

	let _ = write!(
		out,
		"<nav class=\"breadcrumb\"><a href=\"{}\" {}>Home</a>",
		html_escape(&link(base, "/", &Query::new())),
		LINK_MARKER,
	);
	let mut query = Query::new();
	for (key, value) in [("category1", &product.category1), ("category2", &product.category2)] {
		if value.is_empty() {
			continue;
		}
		query.insert(key.to_string(), value.clone());
		let _ = write!(
			out,
			" &gt; <a href=\"{}\" {}>{}</a>",
			html_escape(&link(base, "/", &query)),
			LINK_MARKER,
			html_escape(value),
		);
	}
	out.push_str("</nav>");

	let _ = write!(
		out,
		"<article><img src=\"{image}\" alt=\"{title}\"><h1>{title}</h1>\
		 <p class=\"price\">{price}</p>\
		 <p class=\"rating\">{rating}/5 ({reviews} reviews)</p>\
		 <p class=\"stock\">{stock} in stock</p>\
		 <p class=\"description\">{description}</p></article>",
		image = html_escape(&product.image),
		title = html_escape(&product.title),
		price = html_escape(&product.lprice),
		rating = detail.rating,
		reviews = detail.review_count,
		stock = detail.stock,
		description = html_escape(&detail.description),
	);

	if !state.related_products.is_empty() {
		out.push_str("<section class=\"related\"><h2>Related products</h2><ul class=\"products\">");
		for related in &state.related_products {
			product_card(&mut out, related, base);
		}
		out.push_str("</ul></section>");
	}
	out.push_str("</main>");
	out
}

fn not_found(base: &str) -> String {
	format!(
		"<main class=\"not-found\"><h1>404</h1><p>Page not found</p>\
		 <a href=\"{}/\" {}>Back to home</a></main>",
		html_escape(base),
		LINK_MARKER,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::{CategoryLeaf, ProductDetail};
	use rstest::rstest;
	use vitrine_urls::Params;

	fn scarf() -> Product {
		Product {
			product_id: "11".to_string(),
			title: "Wool <scarf>".to_string(),
			lprice: "20000".to_string(),
			category1: "Fashion".to_string(),
			category2: "Accessories".to_string(),
			..Product::default()
		}
	}

	#[rstest]
	fn test_home_escapes_and_marks_links() {
		// Arrange
		let mut state = ProductState {
			products: vec![scarf()],
			total_count: 1,
			..ProductState::default()
		};
		state
			.categories
			.entry("Fashion".to_string())
			.or_default()
			.insert("Accessories".to_string(), CategoryLeaf {});
		let mut query = Query::new();
		query.insert("search".to_string(), "\"wool\"".to_string());
		query.insert("category1".to_string(), "Fashion".to_string());
		let ctx = RenderContext::new(query, Params::new());

		// Act
		let html = Page::Home.render(&state, &ctx, "/shop");

		// Assert
		assert!(html.contains("<h3>Wool &lt;scarf&gt;</h3>"));
		assert!(html.contains("value=\"&quot;wool&quot;\""));
		assert!(html.contains("href=\"/shop/product/11/\" data-link"));
		assert!(html.contains("href=\"/shop/?category1=Fashion&amp;category2=Accessories\""));
		assert!(html.contains("<p class=\"total\">1 products</p>"));
	}

	#[rstest]
	fn test_detail_uses_route_param_and_related() {
		// Arrange
		let state = ProductState {
			current_product: Some(ProductDetail::from_product(scarf())),
			related_products: vec![Product {
				product_id: "12".to_string(),
				title: "Silk scarf".to_string(),
				..Product::default()
			}],
			..ProductState::default()
		};
		let params: Params = [("id", "11")].into_iter().collect();
		let ctx = RenderContext::new(Query::new(), params);

		// Act
		let html = Page::ProductDetail.render(&state, &ctx, "");

		// Assert
		assert!(html.starts_with("<main class=\"product-detail\" data-product-id=\"11\">"));
		assert!(html.contains("<h1>Wool &lt;scarf&gt;</h1>"));
		assert!(html.contains("href=\"/?category1=Fashion\" data-link>Fashion</a>"));
		assert!(html.contains("data-product-id=\"12\""));
	}

	#[rstest]
	fn test_detail_without_product_shows_loading() {
		let html = Page::ProductDetail.render(&ProductState::default(), &RenderContext::default(), "");
		assert!(html.contains("Loading..."));
	}

	#[rstest]
	fn test_not_found_links_home() {
		let html = Page::NotFound.render(&ProductState::default(), &RenderContext::default(), "/shop");
		assert!(html.contains("href=\"/shop/\" data-link"));
	}
}
