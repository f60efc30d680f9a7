//! Server render entrypoint.
//!
//! Every call builds its own route table, router, store and context relay,
//! so concurrent renders share nothing but the immutable catalog.

use std::sync::Arc;

use tracing::debug;
use vitrine_conf::Settings;
use vitrine_core::Store;
use vitrine_pages::{
	EphemeralRouter, HydrationScript, RenderContext, RenderContextRelay, RenderOutput, Router,
};
use vitrine_urls::{Query, RouteMatch, RouteTable, normalize_base, split_path_and_query};

use crate::catalog::{Catalog, DEFAULT_PAGE_LIMIT, DEFAULT_RELATED_LIMIT, ListingParams};
use crate::error::RenderResult;
use crate::meta::{NOT_FOUND_HEAD, head_metadata};
use crate::state::{ProductReducer, ProductState};
use crate::views::Page;

/// Routes resolved on the server. Anything else renders the not-found page.
pub const SERVER_ROUTES: [(&str, Page); 2] = [("/", Page::Home), ("/product/:id/", Page::ProductDetail)];

/// Routes of a client session, ending in a catch-all.
pub const CLIENT_ROUTES: [(&str, Page); 3] = [
	("/", Page::Home),
	("/product/:id/", Page::ProductDetail),
	(".*", Page::NotFound),
];

pub fn server_routes() -> RouteTable<Page> {
	let mut table = RouteTable::new();
	for (pattern, page) in SERVER_ROUTES {
		table.register(pattern, page);
	}
	table
}

/// Renders storefront pages for the HTTP host and the static site job.
#[derive(Debug, Clone)]
pub struct Renderer {
	catalog: Arc<Catalog>,
	base: String,
	page_limit: usize,
	related_limit: usize,
}

impl Renderer {
	pub fn new(catalog: Arc<Catalog>) -> Self {
		Self {
			catalog,
			base: String::new(),
			page_limit: DEFAULT_PAGE_LIMIT,
			related_limit: DEFAULT_RELATED_LIMIT,
		}
	}

	pub fn from_settings(catalog: Arc<Catalog>, settings: &Settings) -> Self {
		Self::new(catalog)
			.with_base(&settings.base)
			.with_limits(settings.page_limit, settings.related_limit)
	}

	/// Public mount path used for links in rendered markup.
	pub fn with_base(mut self, base: &str) -> Self {
		self.base = normalize_base(base).to_string();
		self
	}

	pub fn with_limits(mut self, page_limit: usize, related_limit: usize) -> Self {
		self.page_limit = page_limit.max(1);
		self.related_limit = related_limit;
		self
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	pub fn base(&self) -> &str {
		&self.base
	}

	/// Renders `url` (already stripped of the base path) with `query`.
	///
	/// Unknown routes and unknown products yield the not-found output with
	/// no initial data.
	///
	/// # Example
	///
	/// ```
	/// use std::sync::Arc;
	/// use vitrine_shop::{Catalog, Renderer};
	/// use vitrine_urls::Query;
	///
	/// let renderer = Renderer::new(Arc::new(Catalog::default()));
	/// let output = renderer.render("/missing/", &Query::new()).unwrap();
	/// assert_eq!(output.head_metadata, "<title>404 - Not Found</title>");
	/// assert!(output.hydration_script.is_empty());
	/// ```
	pub fn render(&self, url: &str, query: &Query) -> RenderResult<RenderOutput> {
		let (path, _) = split_path_and_query(url);
		let router = EphemeralRouter::new(server_routes(), path, query.clone());
		router.start();

		let Some(route) = router.into_match() else {
			debug!(path, "no route matched");
			return Ok(self.not_found());
		};
		let Some(state) = self.load(&route) else {
			debug!(path, "route data not found");
			return Ok(self.not_found());
		};

		let store = Store::new(ProductReducer, ProductState::default());
		store.setup(state);
		let snapshot = store.get_state();

		let mut relay = RenderContextRelay::new();
		let markup = relay.scoped(RenderContext::from_match(&route), |ctx| {
			route.handler.render(&snapshot, ctx, &self.base)
		});
		let head = head_metadata(route.handler, query, &snapshot);
		let script = match route.handler {
			Page::Home => HydrationScript::render(&snapshot.home_projection())?,
			Page::ProductDetail => HydrationScript::render(&snapshot.detail_projection())?,
			Page::NotFound => String::new(),
		};

		debug!(path, page = ?route.handler, "page rendered");
		Ok(RenderOutput::new(markup, head, script))
	}

	/// Prefetches the state a page needs, or `None` when its data is missing.
	fn load(&self, route: &RouteMatch<Page>) -> Option<ProductState> {
		match route.handler {
			Page::Home => {
				let params = ListingParams {
					page: 1,
					..ListingParams::from_query(&route.query, self.page_limit)
				};
				let listing = self.catalog.list(&params);
				Some(ProductState {
					products: listing.products,
					total_count: listing.pagination.total,
					categories: self.catalog.categories(),
					query: route.query.clone(),
					..ProductState::default()
				})
			}
			Page::ProductDetail => {
				let detail = self.catalog.detail(route.params.get("id")?)?;
				let related = self.catalog.related(&detail.product, self.related_limit);
				Some(ProductState {
					current_product: Some(detail),
					related_products: related,
					..ProductState::default()
				})
			}
			Page::NotFound => None,
		}
	}

	fn not_found(&self) -> RenderOutput {
		let markup = Page::NotFound.render(&ProductState::default(), &RenderContext::default(), &self.base);
		RenderOutput::new(markup, NOT_FOUND_HEAD, "")
	}
}
