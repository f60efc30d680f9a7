//! Client session of the storefront.
//!
//! [`ClientApp::bootstrap`] wires a persistent router to a product store.
//! Server-rendered pages hand their data over through the hydration slot;
//! every later route change loads data from the catalog. Loads are tagged
//! with navigation generations so a load started before a newer navigation
//! can never overwrite the newer page's data.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, warn};
use vitrine_core::{Selector, Store};
use vitrine_pages::{
	GenerationToken, History, HydrationSlot, NavigationGeneration, PersistentRouter, RenderContext,
	Router, bootstrap,
};
use vitrine_urls::Query;

use crate::catalog::{
	Catalog, DEFAULT_PAGE_LIMIT, DEFAULT_RELATED_LIMIT, ListingParams, Product, ProductDetail,
};
use crate::render::CLIENT_ROUTES;
use crate::state::{ProductAction, ProductReducer, ProductState};
use crate::views::Page;

/// Query key of the infinite-scroll page counter.
pub const PAGE_KEY: &str = "current";

/// What a route change asks to load.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadRequest {
	Listing {
		/// The route query without the page counter.
		filters: Query,
		query: Query,
		params: ListingParams,
		append: bool,
	},
	Detail {
		id: String,
	},
}

impl LoadRequest {
	fn key(&self) -> LoadKey {
		match self {
			Self::Listing {
				filters, params, ..
			} => LoadKey::Listing {
				filters: filters.clone(),
				page: params.page,
			},
			Self::Detail { id } => LoadKey::Detail(id.clone()),
		}
	}

	/// Key of the data a server render put in the store. Server renders
	/// only ever hold the first listing page.
	fn server_rendered_key(&self) -> LoadKey {
		match self.key() {
			LoadKey::Listing { filters, .. } => LoadKey::Listing { filters, page: 1 },
			key => key,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadKey {
	Listing { filters: Query, page: usize },
	Detail(String),
}

/// A load that has started but not yet written its result.
#[derive(Debug, Clone)]
pub struct PendingLoad {
	token: GenerationToken,
	request: LoadRequest,
}

impl PendingLoad {
	pub fn token(&self) -> GenerationToken {
		self.token
	}
}

/// Result of fetching the data for a [`PendingLoad`].
#[derive(Debug, Clone)]
enum Fetched {
	Listing {
		products: Vec<Product>,
		total_count: usize,
		query: Query,
		append: bool,
	},
	Detail(ProductDetail, Vec<Product>),
	Missing(String),
}

/// One browser session: router, store and the loads between them.
pub struct ClientApp<Hi> {
	router: Arc<PersistentRouter<Page, Hi>>,
	store: Arc<Store<ProductReducer>>,
	catalog: Arc<Catalog>,
	generation: NavigationGeneration,
	last_load: Mutex<Option<LoadKey>>,
	page_limit: usize,
	related_limit: usize,
}

impl<Hi> ClientApp<Hi>
where
	Hi: History + 'static,
{
	/// Starts a session.
	///
	/// Routes are registered and the router started before the store is
	/// hydrated from `slot`. When the slot is empty, the current route's data
	/// is loaded instead.
	pub fn bootstrap(history: Hi, base: &str, slot: &HydrationSlot, catalog: Arc<Catalog>) -> Arc<Self> {
		let router = PersistentRouter::new(history, base);
		for (pattern, page) in CLIENT_ROUTES {
			router.add_route(pattern, page);
		}
		router.start();

		let app = Arc::new(Self {
			router,
			store: Arc::new(Store::new(ProductReducer, ProductState::default())),
			catalog,
			generation: NavigationGeneration::new(),
			last_load: Mutex::new(None),
			page_limit: DEFAULT_PAGE_LIMIT,
			related_limit: DEFAULT_RELATED_LIMIT,
		});

		let hydrated = bootstrap(slot, &app.store).unwrap_or_else(|error| {
			warn!(%error, "discarding unreadable initial data");
			false
		});
		if hydrated {
			let loaded = app
				.request_for_current_route()
				.map(|request| request.server_rendered_key());
			*app.last_load.lock() = loaded;
		} else {
			app.load_current_route();
		}

		let weak: Weak<Self> = Arc::downgrade(&app);
		// Lives as long as the session.
		let _subscription = app.router.subscribe(Arc::new(move || {
			if let Some(app) = weak.upgrade() {
				app.load_current_route();
			}
		}));
		app
	}

	pub fn router(&self) -> &Arc<PersistentRouter<Page, Hi>> {
		&self.router
	}

	pub fn store(&self) -> &Arc<Store<ProductReducer>> {
		&self.store
	}

	pub fn state(&self) -> Arc<ProductState> {
		self.store.get_state()
	}

	/// A selector over the listed products, for consumers that redraw only
	/// when the list actually changed.
	pub fn products_selector(&self) -> Selector<Vec<Product>> {
		Selector::from_store(&self.store, |state: &ProductState| Arc::new(state.products.clone()))
	}

	pub fn navigate(&self, url: &str) {
		self.router.navigate(url);
	}

	/// Renders the current page from the store.
	pub fn render(&self) -> String {
		let page = self
			.router
			.current_match()
			.map(|route| route.handler)
			.unwrap_or(Page::NotFound);
		let ctx = RenderContext::from_router(self.router.as_ref());
		page.render(&self.store.get_state(), &ctx, self.router.base())
	}

	/// Loads and commits the current route's data, if it needs any.
	pub fn load_current_route(&self) -> bool {
		match self.begin_load() {
			Some(pending) => self.complete_load(pending),
			None => false,
		}
	}

	/// Starts a load for the current route and marks the store as loading.
	///
	/// Returns `None` when the route needs no load: the not-found page, or
	/// the data already requested for the same filters, page or product.
	pub fn begin_load(&self) -> Option<PendingLoad> {
		let request = self.request_for_current_route()?;
		let key = request.key();
		{
			let mut last = self.last_load.lock();
			if last.as_ref() == Some(&key) {
				debug!(?key, "route data already loaded");
				return None;
			}
			*last = Some(key);
		}

		let token = self.generation.advance();
		match &request {
			LoadRequest::Listing { .. } => self.store.apply(ProductAction::ProductsLoading),
			LoadRequest::Detail { .. } => self.store.apply(ProductAction::DetailLoading),
		}
		Some(PendingLoad { token, request })
	}

	/// Fetches the data for `pending` and commits it unless a newer load
	/// has started. Returns whether the result was written.
	pub fn complete_load(&self, pending: PendingLoad) -> bool {
		let fetched = self.fetch(&pending.request);
		self.generation
			.commit(pending.token, || self.commit(fetched))
			.is_some()
	}

	fn request_for_current_route(&self) -> Option<LoadRequest> {
		let route = self.router.current_match()?;
		match route.handler {
			Page::Home => {
				let params = ListingParams::from_query(&route.query, self.page_limit);
				let mut filters = route.query.clone();
				filters.remove(PAGE_KEY);
				// Only the page right after the loaded one can be appended.
				let append = params.page > 1
					&& matches!(
						&*self.last_load.lock(),
						Some(LoadKey::Listing { filters: loaded, page })
							if *loaded == filters && page.checked_add(1) == Some(params.page)
					);
				Some(LoadRequest::Listing {
					filters,
					query: route.query,
					params,
					append,
				})
			}
			Page::ProductDetail => route.params.get("id").map(|id| LoadRequest::Detail {
				id: id.to_string(),
			}),
			Page::NotFound => None,
		}
	}

	fn fetch(&self, request: &LoadRequest) -> Fetched {
		match request {
			LoadRequest::Listing {
				query,
				params,
				append,
				..
			} => {
				// A fresh listing starts from the first page.
				let params = if *append {
					params.clone()
				} else {
					ListingParams {
						limit: params.limit.saturating_mul(params.page),
						page: 1,
						..params.clone()
					}
				};
				let listing = self.catalog.list(&params);
				Fetched::Listing {
					products: listing.products,
					total_count: listing.pagination.total,
					query: query.clone(),
					append: *append,
				}
			}
			LoadRequest::Detail { id } => match self.catalog.detail(id) {
				Some(detail) => {
					let related = self.catalog.related(&detail.product, self.related_limit);
					Fetched::Detail(detail, related)
				}
				None => Fetched::Missing(format!("Product {} not found", id)),
			},
		}
	}

	fn commit(&self, fetched: Fetched) {
		match fetched {
			Fetched::Listing {
				products,
				total_count,
				query,
				append,
			} => {
				if self.store.get_state().categories.is_empty() {
					self.store
						.apply(ProductAction::CategoriesLoaded(self.catalog.categories()));
				}
				let action = if append {
					ProductAction::MoreProductsLoaded {
						products,
						total_count,
					}
				} else {
					ProductAction::ProductsLoaded {
						products,
						total_count,
						query,
					}
				};
				self.store.apply(action);
			}
			Fetched::Detail(product, related) => {
				self.store
					.apply(ProductAction::DetailLoaded { product, related });
			}
			Fetched::Missing(message) => self.store.apply(ProductAction::Failed(message)),
		}
	}
}

/// Mounts the storefront on the running page.
///
/// Reads and removes `window.__INITIAL_DATA__`, starts the session and
/// redraws `#root` whenever the route or the store changes. A root that is
/// already filled by the server is kept until the first change.
#[cfg(target_arch = "wasm32")]
pub fn mount(
	catalog: Arc<Catalog>,
	base: &str,
) -> vitrine_pages::HydrationResult<Arc<ClientApp<vitrine_pages::BrowserHistory>>> {
	let slot = HydrationSlot::from_window()?;
	let app = ClientApp::bootstrap(vitrine_pages::BrowserHistory::new(), base, &slot, catalog);

	let repaint = {
		let weak = Arc::downgrade(&app);
		Arc::new(move || {
			let Some(app) = weak.upgrade() else {
				return;
			};
			let root = web_sys::window()
				.and_then(|window| window.document())
				.and_then(|document| document.get_element_by_id("root"));
			match root {
				Some(root) => root.set_inner_html(&app.render()),
				None => warn!("#root element not found"),
			}
		})
	};

	let root_is_empty = web_sys::window()
		.and_then(|window| window.document())
		.and_then(|document| document.get_element_by_id("root"))
		.map(|root| root.inner_html().is_empty())
		.unwrap_or(true);
	if root_is_empty {
		repaint();
	}

	let _route_listener = app.router().subscribe(repaint.clone());
	let _store_listener = app.store().subscribe_listener(repaint);
	Ok(app)
}
