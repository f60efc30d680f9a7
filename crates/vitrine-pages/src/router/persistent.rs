//! Session-long router bound to a history backend.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, error};
use url::Url;
use vitrine_core::{Listener, Observer, Unsubscribe};
use vitrine_urls::{
	Query, RouteMatch, RouteTable, merge_query, normalize_base, normalize_target, parse_query,
	split_path_and_query, stringify_query,
};

use super::Router;
use crate::error::{NavigationError, NavigationResult};
use crate::history::{History, LinkActivation, NavigationHooks};

enum RouterState<H> {
	Uninitialized,
	Active(Option<RouteMatch<H>>),
}

/// The browser-session router.
///
/// Created once per session with [`PersistentRouter::new`], which installs
/// the back/forward and link-capture hooks on the history backend. Routes
/// are added before [`start`](Router::start); after that every navigation
/// re-resolves the location and notifies subscribers exactly once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vitrine_pages::{History, MemoryHistory, PersistentRouter, Router};
///
/// let history = Arc::new(MemoryHistory::new("/"));
/// let router = PersistentRouter::new(Arc::clone(&history), "/");
/// router.add_route("/", "home");
/// router.add_route("/product/:id/", "detail");
/// router.start();
///
/// router.navigate("/product/3/");
/// assert_eq!(history.location(), "/product/3/");
/// assert_eq!(router.params().get("id"), Some("3"));
/// ```
pub struct PersistentRouter<H, Hi> {
	history: Hi,
	base: String,
	table: RwLock<RouteTable<H>>,
	state: RwLock<RouterState<H>>,
	observer: Observer,
}

impl<H, Hi> PersistentRouter<H, Hi>
where
	H: Clone + Send + Sync + 'static,
	Hi: History + 'static,
{
	/// Creates the router and installs its navigation hooks on `history`.
	pub fn new(history: Hi, base: &str) -> Arc<Self> {
		let base = normalize_base(base).to_string();
		let router = Arc::new(Self {
			history,
			table: RwLock::new(RouteTable::with_base(&base)),
			base,
			state: RwLock::new(RouterState::Uninitialized),
			observer: Observer::new(),
		});

		let on_pop: Weak<Self> = Arc::downgrade(&router);
		let on_link: Weak<Self> = Arc::downgrade(&router);
		router.history.install(NavigationHooks::new(
			move || {
				if let Some(router) = on_pop.upgrade() {
					router.handle_pop_state();
				}
			},
			move |activation| {
				if let Some(router) = on_link.upgrade() {
					router.handle_link_activation(activation);
				}
			},
		));
		router
	}

	/// Registers a route. Templates are matched under the router's base path.
	pub fn add_route(&self, pattern: &str, handler: H) {
		self.table.write().register(pattern, handler);
	}

	/// Base path without trailing slash.
	pub fn base(&self) -> &str {
		&self.base
	}

	pub fn history(&self) -> &Hi {
		&self.history
	}

	/// Whether [`start`](Router::start) has run.
	pub fn is_active(&self) -> bool {
		matches!(*self.state.read(), RouterState::Active(_))
	}

	/// The observer notified after every transition.
	pub fn observer(&self) -> &Observer {
		&self.observer
	}

	/// Navigates, returning the failure instead of logging it.
	///
	/// A target equal to the current location pushes no entry but still
	/// re-resolves and notifies once.
	pub fn navigate_checked(&self, url: &str) -> NavigationResult<()> {
		let target = normalize_target(&self.base, url);
		let full_url = self.resolve_target(&target)?;

		if full_url != self.history.location() {
			self.history.push(&full_url)?;
		} else {
			debug!(url = %full_url, "already at navigation target");
		}

		self.transition(&full_url);
		Ok(())
	}

	/// Re-resolves after the backend has moved through the history stack.
	pub fn handle_pop_state(&self) {
		let location = self.history.location();
		debug!(location = %location, "history traversal");
		self.transition(&location);
	}

	/// Claims activations of marked links that carry an `href`.
	pub fn handle_link_activation(&self, activation: &mut LinkActivation) {
		if !activation.is_marked() {
			return;
		}
		let Some(href) = activation.href().map(str::to_string) else {
			return;
		};
		activation.prevent_default();
		self.navigate(&href);
	}

	/// Merges `updates` into the current query and navigates to the result.
	///
	/// Keys whose merged value is empty are dropped from the URL.
	pub fn set_query(&self, updates: &Query) {
		let location = self.history.location();
		let (path, search) = split_path_and_query(&location);
		let current = search.map(parse_query).unwrap_or_default();
		let merged = merge_query(&current, updates);
		let encoded = stringify_query(&merged);
		let target = if encoded.is_empty() {
			path.to_string()
		} else {
			format!("{}?{}", path, encoded)
		};
		self.navigate(&target);
	}

	/// Parses `target` against the session origin into `path[?search]`.
	fn resolve_target(&self, target: &str) -> NavigationResult<String> {
		let origin = self.history.origin();
		let invalid = |reason: String| NavigationError::InvalidUrl {
			url: target.to_string(),
			reason,
		};

		let root = Url::parse(&origin).map_err(|e| invalid(e.to_string()))?;
		let resolved = root.join(target).map_err(|e| invalid(e.to_string()))?;
		if resolved.origin() != root.origin() {
			return Err(NavigationError::CrossOrigin {
				url: target.to_string(),
				origin,
			});
		}

		Ok(match resolved.query() {
			Some(search) if !search.is_empty() => format!("{}?{}", resolved.path(), search),
			_ => resolved.path().to_string(),
		})
	}

	fn transition(&self, location: &str) {
		let (path, search) = split_path_and_query(location);
		let query = search.map(parse_query).unwrap_or_default();
		let resolved = self.table.read().resolve(path, &query);
		if resolved.is_none() {
			debug!(path, "no route matches location");
		}
		*self.state.write() = RouterState::Active(resolved);
		self.observer.notify();
	}
}

impl<H, Hi> Router<H> for PersistentRouter<H, Hi>
where
	H: Clone + Send + Sync + 'static,
	Hi: History + 'static,
{
	fn current_match(&self) -> Option<RouteMatch<H>> {
		match &*self.state.read() {
			RouterState::Active(current) => current.clone(),
			RouterState::Uninitialized => None,
		}
	}

	fn start(&self) {
		let location = self.history.location();
		debug!(location = %location, base = %self.base, "router started");
		self.transition(&location);
	}

	fn navigate(&self, url: &str) {
		if let Err(error) = self.navigate_checked(url) {
			error!(url, %error, "navigation failed; staying on current route");
		}
	}

	fn subscribe(&self, listener: Listener) -> Unsubscribe {
		self.observer.subscribe_listener(listener)
	}
}

impl<H, Hi: fmt::Debug> fmt::Debug for PersistentRouter<H, Hi> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PersistentRouter")
			.field("history", &self.history)
			.field("base", &self.base)
			.field("routes", &self.table.read().len())
			.field(
				"active",
				&matches!(*self.state.read(), RouterState::Active(_)),
			)
			.finish()
	}
}
