//! Snapshot stabilization for derived values.
//!
//! A store notifies on every dispatch, and a derivation over its state may
//! allocate a fresh value each time. [`SnapshotCache`] collapses equal
//! derived values to a single `Arc` so consumers can detect real changes with
//! [`Arc::ptr_eq`]. The comparison is by pointer first, then by `PartialEq`.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observer::{Observer, Unsubscribe};
use crate::store::{Reducer, Store};

/// Remembers the last derived value and reuses it while equal values arrive.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vitrine_core::SnapshotCache;
///
/// let mut cache = SnapshotCache::new();
/// let first = cache.stabilize(Arc::new(vec![1, 2, 3]));
/// let second = cache.stabilize(Arc::new(vec![1, 2, 3]));
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct SnapshotCache<V> {
	cached: Option<Arc<V>>,
}

impl<V> Default for SnapshotCache<V> {
	fn default() -> Self {
		Self { cached: None }
	}
}

impl<V: PartialEq> SnapshotCache<V> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached value when `next` is the same allocation or
	/// compares equal to it; otherwise caches and returns `next`.
	pub fn stabilize(&mut self, next: Arc<V>) -> Arc<V> {
		if let Some(cached) = &self.cached
			&& (Arc::ptr_eq(cached, &next) || **cached == *next)
		{
			return Arc::clone(cached);
		}
		self.cached = Some(Arc::clone(&next));
		next
	}
}

impl<V> SnapshotCache<V> {
	/// The currently cached value.
	pub fn current(&self) -> Option<&Arc<V>> {
		self.cached.as_ref()
	}

	pub fn reset(&mut self) {
		self.cached = None;
	}
}

type Derive<V> = Box<dyn Fn() -> Arc<V> + Send + Sync>;

/// A derivation bound to a notification source, with its own cache.
///
/// Each consumer creates its own selector; caches are never shared between
/// consumers.
pub struct Selector<V> {
	observer: Observer,
	derive: Derive<V>,
	cache: Mutex<SnapshotCache<V>>,
}

impl<V> Selector<V>
where
	V: PartialEq + Send + Sync + 'static,
{
	/// Binds `derive` to an arbitrary observer.
	pub fn new<F>(observer: Observer, derive: F) -> Self
	where
		F: Fn() -> Arc<V> + Send + Sync + 'static,
	{
		Self {
			observer,
			derive: Box::new(derive),
			cache: Mutex::new(SnapshotCache::new()),
		}
	}

	/// Binds a derivation over the state of `store`.
	pub fn from_store<R, F>(store: &Arc<Store<R>>, derive: F) -> Self
	where
		R: Reducer + 'static,
		F: Fn(&R::State) -> Arc<V> + Send + Sync + 'static,
	{
		let source = Arc::clone(store);
		Self::new(store.observer().clone(), move || {
			derive(&source.get_state())
		})
	}

	/// Derives from the current state and stabilizes the result.
	pub fn snapshot(&self) -> Arc<V> {
		let next = (self.derive)();
		self.cache.lock().stabilize(next)
	}

	/// Returns the new snapshot only if it differs from the cached one.
	pub fn changed(&self) -> Option<Arc<V>> {
		let next = (self.derive)();
		let mut cache = self.cache.lock();
		let previous = cache.current().cloned();
		let stable = cache.stabilize(next);
		match previous {
			Some(previous) if Arc::ptr_eq(&previous, &stable) => None,
			_ => Some(stable),
		}
	}

	pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.observer.subscribe(listener)
	}
}

impl<V> fmt::Debug for Selector<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Selector")
			.field("observer", &self.observer)
			.field("cached", &self.cache.lock().current().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, PartialEq)]
	struct Listing {
		ids: Vec<u32>,
	}

	#[rstest]
	fn test_same_allocation_is_reused() {
		// Arrange
		let mut cache = SnapshotCache::new();
		let value = Arc::new(Listing { ids: vec![1] });

		// Act
		let first = cache.stabilize(Arc::clone(&value));
		let second = cache.stabilize(Arc::clone(&value));

		// Assert
		assert!(Arc::ptr_eq(&first, &value));
		assert!(Arc::ptr_eq(&second, &value));
	}

	#[rstest]
	fn test_equal_values_collapse_to_first_reference() {
		// Arrange
		let mut cache = SnapshotCache::new();
		let first = cache.stabilize(Arc::new(Listing { ids: vec![1, 2] }));

		// Act
		let fresh = Arc::new(Listing { ids: vec![1, 2] });
		let second = cache.stabilize(Arc::clone(&fresh));

		// Assert
		assert!(Arc::ptr_eq(&first, &second));
		assert!(!Arc::ptr_eq(&second, &fresh));
	}

	#[rstest]
	fn test_different_value_replaces_cache() {
		// Arrange
		let mut cache = SnapshotCache::new();
		let first = cache.stabilize(Arc::new(Listing { ids: vec![1] }));

		// Act
		let second = cache.stabilize(Arc::new(Listing { ids: vec![2] }));

		// Assert
		assert!(!Arc::ptr_eq(&first, &second));
		assert_eq!(cache.current().map(|v| v.ids.clone()), Some(vec![2]));
	}

	#[rstest]
	fn test_reset_forgets_cached_value() {
		let mut cache = SnapshotCache::new();
		let first = cache.stabilize(Arc::new(Listing { ids: vec![1] }));
		cache.reset();
		let second = cache.stabilize(Arc::new(Listing { ids: vec![1] }));
		assert!(!Arc::ptr_eq(&first, &second));
	}

	#[rstest]
	fn test_selector_debug_reports_cache_state() {
		// Arrange
		#[derive(PartialEq)]
		struct Opaque(u8);
		let selector = Selector::new(Observer::new(), || Arc::new(Opaque(7)));
		let before = format!("{:?}", selector);

		// Act
		let _ = selector.snapshot();

		// Assert
		assert!(before.contains("cached: false"));
		assert!(format!("{:?}", selector).contains("cached: true"));
	}
}
