//! Query-string codec and base-path helpers.
//!
//! Queries are plain `key=value` maps. Encoding omits keys whose value is
//! empty rather than writing `key=`, and a `BTreeMap` keeps the encoded
//! output deterministic.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Decoded query parameters.
pub type Query = BTreeMap<String, String>;

/// Parses a query string, with or without its leading `?`.
///
/// Later occurrences of a key replace earlier ones. Values are
/// percent-decoded and `+` is read as a space.
///
/// # Example
///
/// ```
/// use vitrine_urls::parse_query;
///
/// let query = parse_query("?search=red+shoes&limit=10");
/// assert_eq!(query.get("search").map(String::as_str), Some("red shoes"));
/// assert_eq!(query.get("limit").map(String::as_str), Some("10"));
/// ```
pub fn parse_query(search: &str) -> Query {
	let search = search.strip_prefix('?').unwrap_or(search);
	form_urlencoded::parse(search.as_bytes())
		.into_owned()
		.collect()
}

/// Encodes a query without the leading `?`, skipping empty values.
///
/// # Example
///
/// ```
/// use vitrine_urls::{Query, stringify_query};
///
/// let mut query = Query::new();
/// query.insert("search".into(), "red shoes".into());
/// query.insert("category1".into(), String::new());
/// assert_eq!(stringify_query(&query), "search=red+shoes");
/// ```
pub fn stringify_query(query: &Query) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in query.iter().filter(|(_, value)| !value.is_empty()) {
		serializer.append_pair(key, value);
	}
	serializer.finish()
}

/// Overlays `updates` on `current`. An empty update value removes the key.
pub fn merge_query(current: &Query, updates: &Query) -> Query {
	let mut merged = current.clone();
	for (key, value) in updates {
		if value.is_empty() {
			merged.remove(key);
		} else {
			merged.insert(key.clone(), value.clone());
		}
	}
	merged.retain(|_, value| !value.is_empty());
	merged
}

/// Splits `url` at the first `?`.
pub fn split_path_and_query(url: &str) -> (&str, Option<&str>) {
	match url.split_once('?') {
		Some((path, search)) => (path, Some(search)),
		None => (url, None),
	}
}

/// Removes a trailing slash from a configured base path.
///
/// `/` and the empty string both normalize to the empty base.
pub fn normalize_base(base: &str) -> &str {
	base.trim_end_matches('/')
}

/// Resolves a navigation target against the base path.
///
/// A target already under `base` is returned unchanged; otherwise the base is
/// prefixed, inserting a `/` when the target is relative.
///
/// # Example
///
/// ```
/// use vitrine_urls::normalize_target;
///
/// assert_eq!(normalize_target("/shop", "/product/1/"), "/shop/product/1/");
/// assert_eq!(normalize_target("/shop", "product/1/"), "/shop/product/1/");
/// assert_eq!(normalize_target("/shop", "/shop/product/1/"), "/shop/product/1/");
/// ```
pub fn normalize_target(base: &str, url: &str) -> String {
	let base = normalize_base(base);
	if url.starts_with(base) {
		url.to_string()
	} else if url.starts_with('/') {
		format!("{}{}", base, url)
	} else {
		format!("{}/{}", base, url)
	}
}

/// Strips the base path from an incoming request target.
///
/// The result always starts with `/`. The base only matches on a segment
/// boundary, so `/shopping` is not treated as being under `/shop`.
///
/// # Example
///
/// ```
/// use vitrine_urls::strip_base;
///
/// assert_eq!(strip_base("/shop", "/shop/product/1/"), "/product/1/");
/// assert_eq!(strip_base("/shop", "/shop?search=x"), "/?search=x");
/// assert_eq!(strip_base("/shop", "/shopping/"), "/shopping/");
/// ```
pub fn strip_base(base: &str, url: &str) -> String {
	let base = normalize_base(base);
	let rest = match url.strip_prefix(base) {
		Some(rest)
			if !base.is_empty()
				&& (rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')) =>
		{
			rest
		}
		_ => url,
	};

	if rest.starts_with('/') {
		rest.to_string()
	} else {
		format!("/{}", rest)
	}
}
