//! Ordered route table.

use std::collections::HashMap;

use tracing::warn;

use crate::error::Result;
use crate::params::Params;
use crate::pattern::PathPattern;
use crate::query::{Query, parse_query, split_path_and_query};

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<H> {
	/// The template string the route was registered with.
	pub route_id: String,
	/// Captured parameters in template order.
	pub params: Params,
	/// The handler registered for the route.
	pub handler: H,
	/// Query parameters supplied with the resolution.
	pub query: Query,
}

#[derive(Debug, Clone)]
struct RouteEntry<H> {
	pattern: String,
	/// `None` when the template failed to compile; such entries never match.
	compiled: Option<PathPattern>,
	handler: H,
}

/// Routes in registration order, first match wins.
///
/// Entries are keyed by their template string. Registering a template that
/// is already present replaces its handler and matcher without moving it.
///
/// # Example
///
/// ```
/// use vitrine_urls::{Query, RouteTable};
///
/// let mut table = RouteTable::new();
/// table.register("/", "home");
/// table.register("/product/:id/", "detail");
///
/// let hit = table.resolve("/product/42/", &Query::new()).unwrap();
/// assert_eq!(hit.handler, "detail");
/// assert_eq!(hit.params.get("id"), Some("42"));
/// assert!(table.resolve("/missing/", &Query::new()).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
	base: String,
	entries: Vec<RouteEntry<H>>,
	index: HashMap<String, usize>,
}

impl<H> Default for RouteTable<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H> RouteTable<H> {
	/// Creates an empty table with no base path.
	pub fn new() -> Self {
		Self::with_base("")
	}

	/// Creates an empty table whose routes only match under `base`.
	pub fn with_base(base: &str) -> Self {
		Self {
			base: base.trim_end_matches('/').to_string(),
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Returns the base path, without trailing slash.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Registers a route, degrading a malformed template to a route that
	/// never matches.
	pub fn register(&mut self, pattern: &str, handler: H) {
		let compiled = match PathPattern::with_base(pattern, &self.base) {
			Ok(compiled) => Some(compiled),
			Err(error) => {
				warn!(pattern, %error, "route pattern does not compile; it will never match");
				None
			}
		};
		self.insert(pattern, compiled, handler);
	}

	/// Registers a route, returning the compilation error instead of
	/// storing a never-matching entry.
	pub fn try_register(&mut self, pattern: &str, handler: H) -> Result<()> {
		let compiled = PathPattern::with_base(pattern, &self.base)?;
		self.insert(pattern, Some(compiled), handler);
		Ok(())
	}

	fn insert(&mut self, pattern: &str, compiled: Option<PathPattern>, handler: H) {
		let entry = RouteEntry {
			pattern: pattern.to_string(),
			compiled,
			handler,
		};
		match self.index.get(pattern) {
			Some(&position) => self.entries[position] = entry,
			None => {
				self.index.insert(pattern.to_string(), self.entries.len());
				self.entries.push(entry);
			}
		}
	}

	/// Returns the registered templates in matching order.
	pub fn patterns(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.pattern.as_str())
	}

	/// Returns the compiled form of a registered template.
	pub fn compiled(&self, pattern: &str) -> Option<&PathPattern> {
		let position = *self.index.get(pattern)?;
		self.entries[position].compiled.as_ref()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<H: Clone> RouteTable<H> {
	/// Resolves `path` against the routes in registration order.
	///
	/// Anything after a `?` in `path` is ignored; the supplied `query` is
	/// carried into the match. Returns `None` when no route accepts the path.
	pub fn resolve(&self, path: &str, query: &Query) -> Option<RouteMatch<H>> {
		let (path, _) = split_path_and_query(path);
		self.entries.iter().find_map(|entry| {
			let params = entry.compiled.as_ref()?.matches(path)?;
			Some(RouteMatch {
				route_id: entry.pattern.clone(),
				params,
				handler: entry.handler.clone(),
				query: query.clone(),
			})
		})
	}

	/// Resolves a URL whose query, if any, is part of the string.
	pub fn resolve_url(&self, url: &str) -> Option<RouteMatch<H>> {
		let (path, search) = split_path_and_query(url);
		let query = search.map(parse_query).unwrap_or_default();
		self.resolve(path, &query)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn storefront() -> RouteTable<&'static str> {
		let mut table = RouteTable::new();
		table.register("/", "home");
		table.register("/product/:id/", "detail");
		table.register(".*", "not_found");
		table
	}

	#[rstest]
	fn test_resolve_detail(storefront: RouteTable<&'static str>) {
		// Act
		let hit = storefront.resolve("/product/42/", &Query::new()).unwrap();

		// Assert
		assert_eq!(hit.route_id, "/product/:id/");
		assert_eq!(hit.handler, "detail");
		assert_eq!(hit.params.get("id"), Some("42"));
	}

	#[rstest]
	fn test_catch_all_registered_last(storefront: RouteTable<&'static str>) {
		let hit = storefront.resolve("/nowhere", &Query::new()).unwrap();
		assert_eq!(hit.handler, "not_found");
	}

	#[rstest]
	fn test_query_suffix_is_ignored(storefront: RouteTable<&'static str>) {
		// Arrange
		let mut query = Query::new();
		query.insert("search".to_string(), "shoes".to_string());

		// Act
		let hit = storefront.resolve("/?ignored=1", &query).unwrap();

		// Assert
		assert_eq!(hit.handler, "home");
		assert_eq!(hit.query, query);
	}

	#[rstest]
	fn test_resolve_url_parses_query(storefront: RouteTable<&'static str>) {
		let hit = storefront.resolve_url("/?limit=10").unwrap();
		assert_eq!(hit.query.get("limit").map(String::as_str), Some("10"));
	}

	#[rstest]
	fn test_reregistering_keeps_position() {
		// Arrange
		let mut table = RouteTable::new();
		table.register("/a/:x/", 1);
		table.register("/a/b/", 2);

		// Act
		table.register("/a/:x/", 3);

		// Assert
		assert_eq!(table.len(), 2);
		assert_eq!(table.patterns().collect::<Vec<_>>(), vec!["/a/:x/", "/a/b/"]);
		assert_eq!(table.resolve("/a/b/", &Query::new()).unwrap().handler, 3);
	}

	#[rstest]
	fn test_malformed_pattern_never_matches() {
		// Arrange
		let mut table = RouteTable::new();
		table.register("/dup/:id/:id/", "dup");
		table.register("/dup/:a/:b/", "ok");

		// Act
		let hit = table.resolve("/dup/1/2/", &Query::new()).unwrap();

		// Assert
		assert_eq!(hit.handler, "ok");
		assert!(table.compiled("/dup/:id/:id/").is_none());
		assert_eq!(table.len(), 2);
	}

	#[rstest]
	fn test_try_register_reports_error() {
		let mut table: RouteTable<()> = RouteTable::new();
		assert!(table.try_register("/dup/:id/:id/", ()).is_err());
		assert!(table.is_empty());
	}

	#[rstest]
	fn test_base_path_table() {
		// Arrange
		let mut table = RouteTable::with_base("/shop/");
		table.register("/product/:id/", "detail");

		// Act
		let under_base = table.resolve("/shop/product/3/", &Query::new());
		let outside = table.resolve("/product/3/", &Query::new());

		// Assert
		assert_eq!(under_base.unwrap().params.get("id"), Some("3"));
		assert!(outside.is_none());
		assert_eq!(table.base(), "/shop");
	}
}
