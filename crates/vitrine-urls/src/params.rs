//! Ordered path parameters captured by a route match.

use std::collections::HashMap;

/// Path parameters in the order their tokens appear in the template.
///
/// The nth entry pairs the nth `:name` token with the nth capture group, so
/// iteration order is stable across resolutions of the same route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	entries: Vec<(String, String)>,
}

impl Params {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a parameter. Used while pairing names with captures.
	pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.entries.push((name.into(), value.into()));
	}

	/// Returns the captured value for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Iterates `(name, value)` pairs in template order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Captured values in template order.
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(_, value)| value.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Copies the parameters into an unordered map.
	pub fn to_map(&self) -> HashMap<String, String> {
		self.entries.iter().cloned().collect()
	}
}

impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();
		for (name, value) in iter {
			params.push(name, value);
		}
		params
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_iteration_keeps_insertion_order() {
		// Arrange
		let params: Params = [("user", "7"), ("post", "42"), ("anchor", "top")]
			.into_iter()
			.collect();

		// Act
		let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
		let values: Vec<&str> = params.values().collect();

		// Assert
		assert_eq!(names, vec!["user", "post", "anchor"]);
		assert_eq!(values, vec!["7", "42", "top"]);
	}

	#[rstest]
	fn test_get_and_to_map() {
		// Arrange
		let params: Params = [("id", "42")].into_iter().collect();

		// Act
		let map = params.to_map();

		// Assert
		assert_eq!(params.get("id"), Some("42"));
		assert_eq!(params.get("missing"), None);
		assert_eq!(map.get("id").map(String::as_str), Some("42"));
		assert_eq!(params.len(), 1);
		assert!(!params.is_empty());
	}
}
