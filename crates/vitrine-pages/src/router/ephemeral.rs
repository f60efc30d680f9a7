//! Single-resolution router for server renders.

use std::sync::OnceLock;

use tracing::debug;
use vitrine_core::{Listener, Unsubscribe};
use vitrine_urls::{Query, RouteMatch, RouteTable};

use super::Router;

/// A router that resolves one path exactly once.
///
/// Built fresh for every render; it holds its own table, path and query and
/// shares nothing with other renders.
///
/// # Example
///
/// ```
/// use vitrine_pages::{EphemeralRouter, Router};
/// use vitrine_urls::{Query, RouteTable};
///
/// let mut table = RouteTable::new();
/// table.register("/product/:id/", "detail");
///
/// let router = EphemeralRouter::new(table, "/product/7/", Query::new());
/// router.start();
/// assert_eq!(router.params().get("id"), Some("7"));
///
/// // Navigation has no effect on a single render.
/// router.navigate("/");
/// assert_eq!(router.current_match().unwrap().handler, "detail");
/// ```
#[derive(Debug)]
pub struct EphemeralRouter<H> {
	table: RouteTable<H>,
	path: String,
	query: Query,
	resolved: OnceLock<Option<RouteMatch<H>>>,
}

impl<H: Clone> EphemeralRouter<H> {
	pub fn new(table: RouteTable<H>, path: &str, query: Query) -> Self {
		Self {
			table,
			path: path.to_string(),
			query,
			resolved: OnceLock::new(),
		}
	}

	fn resolution(&self) -> &Option<RouteMatch<H>> {
		self.resolved
			.get_or_init(|| self.table.resolve(&self.path, &self.query))
	}

	/// Resolves (if not yet done) and hands back the match by value.
	pub fn into_match(self) -> Option<RouteMatch<H>> {
		let _ = self.resolution();
		self.resolved.into_inner().flatten()
	}

	/// The path this router was built for.
	pub fn path(&self) -> &str {
		&self.path
	}
}

impl<H: Clone> Router<H> for EphemeralRouter<H> {
	/// Returns the single resolution, performing it on first access if
	/// [`start`](Router::start) was not called.
	fn current_match(&self) -> Option<RouteMatch<H>> {
		self.resolution().clone()
	}

	fn start(&self) {
		let _ = self.resolution();
	}

	fn navigate(&self, url: &str) {
		debug!(url, path = %self.path, "navigation ignored during a single render");
	}

	fn subscribe(&self, _listener: Listener) -> Unsubscribe {
		Unsubscribe::inert()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::sync::Arc;

	#[fixture]
	fn table() -> RouteTable<&'static str> {
		let mut table = RouteTable::new();
		table.register("/", "home");
		table.register("/product/:id/", "detail");
		table
	}

	#[rstest]
	fn test_resolves_once_and_carries_query(table: RouteTable<&'static str>) {
		// Arrange
		let mut query = Query::new();
		query.insert("limit".to_string(), "10".to_string());
		let router = EphemeralRouter::new(table, "/", query.clone());

		// Act
		router.start();
		router.start();

		// Assert
		let hit = router.current_match().unwrap();
		assert_eq!(hit.handler, "home");
		assert_eq!(router.query(), query);
	}

	#[rstest]
	fn test_no_match_is_none(table: RouteTable<&'static str>) {
		let router = EphemeralRouter::new(table, "/missing/", Query::new());
		router.start();
		assert!(router.current_match().is_none());
		assert!(router.params().is_empty());
	}

	#[rstest]
	fn test_subscribe_is_inert(table: RouteTable<&'static str>) {
		// Arrange
		let router = EphemeralRouter::new(table, "/", Query::new());

		// Act
		let handle = router.subscribe(Arc::new(|| panic!("never notified")));
		router.navigate("/product/1/");

		// Assert
		assert!(!handle.is_attached());
		assert_eq!(router.current_match().unwrap().handler, "home");
	}

	#[rstest]
	fn test_into_match(table: RouteTable<&'static str>) {
		let router = EphemeralRouter::new(table, "/product/5/", Query::new());
		let hit = router.into_match().unwrap();
		assert_eq!(hit.params.get("id"), Some("5"));
	}
}
