//! Path patterns, route tables and query helpers for Vitrine.
//!
//! This crate holds the environment-independent half of routing. A
//! [`RouteTable`] compiles `:name` templates into anchored matchers and
//! resolves paths in registration order; the router variants in
//! `vitrine-pages` wrap a table for either a single server render or a long
//! lived browser session.
//!
//! ## Example
//!
//! ```
//! use vitrine_urls::{RouteTable, parse_query};
//!
//! let mut table = RouteTable::new();
//! table.register("/", "home");
//! table.register("/product/:id/", "detail");
//!
//! let query = parse_query("search=shoes");
//! let hit = table.resolve("/", &query).unwrap();
//! assert_eq!(hit.handler, "home");
//! assert_eq!(hit.query.get("search").map(String::as_str), Some("shoes"));
//! ```

pub mod error;
pub mod params;
pub mod pattern;
pub mod query;
pub mod table;

pub use error::{PatternError, Result};
pub use params::Params;
pub use pattern::PathPattern;
pub use query::{
	Query, merge_query, normalize_base, normalize_target, parse_query, split_path_and_query,
	strip_base, stringify_query,
};
pub use table::{RouteMatch, RouteTable};
