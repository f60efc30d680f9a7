//! Integration tests for stores observed through selectors.
//!
//! These tests verify:
//! 1. Notification count equals dispatch count
//! 2. Structurally equal derivations keep one identity across snapshots
//! 3. Each selector keeps its own cache

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::{fixture, rstest};
use vitrine_core::{Reducer, Selector, Store};

#[derive(Debug, Clone, Default)]
struct Catalog {
	titles: Vec<String>,
	loading: bool,
}

enum CatalogAction {
	Loading(bool),
	Loaded(Vec<String>),
}

struct CatalogReducer;

impl Reducer for CatalogReducer {
	type State = Catalog;
	type Action = CatalogAction;

	fn reduce(&self, state: &Catalog, action: CatalogAction) -> Catalog {
		match action {
			CatalogAction::Loading(loading) => Catalog {
				loading,
				..state.clone()
			},
			CatalogAction::Loaded(titles) => Catalog {
				titles,
				loading: false,
			},
		}
	}
}

#[fixture]
fn store() -> Arc<Store<CatalogReducer>> {
	Arc::new(Store::new(CatalogReducer, Catalog::default()))
}

/// Notifications fire once per dispatch, including no-op dispatches
#[rstest]
fn test_notification_count_matches_dispatch_count(store: Arc<Store<CatalogReducer>>) {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let _handle = store.subscribe(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	// Act
	for _ in 0..5 {
		store.apply(CatalogAction::Loading(false));
	}

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), 5);
}

/// A derivation that allocates a fresh Vec each time still yields one identity
#[rstest]
fn test_selector_keeps_identity_for_equal_derivations(store: Arc<Store<CatalogReducer>>) {
	// Arrange
	store.apply(CatalogAction::Loaded(vec!["Lamp".to_string()]));
	let titles = Selector::from_store(&store, |state: &Catalog| Arc::new(state.titles.clone()));
	let first = titles.snapshot();

	// Act: an unrelated field changes and the titles are re-derived
	store.apply(CatalogAction::Loading(true));
	let second = titles.snapshot();

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
	assert!(titles.changed().is_none());
}

/// A real change produces a new identity exactly once
#[rstest]
fn test_selector_reports_real_change(store: Arc<Store<CatalogReducer>>) {
	// Arrange
	let titles = Selector::from_store(&store, |state: &Catalog| Arc::new(state.titles.clone()));
	let _ = titles.snapshot();

	// Act
	store.apply(CatalogAction::Loaded(vec!["Desk".to_string()]));
	let changed = titles.changed();
	let again = titles.changed();

	// Assert
	assert_eq!(changed.as_deref(), Some(&vec!["Desk".to_string()]));
	assert!(again.is_none());
}

/// Two consumers never share a cache
#[rstest]
fn test_selectors_have_independent_caches(store: Arc<Store<CatalogReducer>>) {
	// Arrange
	let a = Selector::from_store(&store, |state: &Catalog| Arc::new(state.titles.clone()));
	let b = Selector::from_store(&store, |state: &Catalog| Arc::new(state.titles.clone()));

	// Act
	let from_a = a.snapshot();
	let from_b = b.snapshot();

	// Assert
	assert_eq!(from_a, from_b);
	assert!(!Arc::ptr_eq(&from_a, &from_b));
}

/// Selector subscriptions are driven by the store's notifications
#[rstest]
fn test_selector_subscription_follows_store(store: Arc<Store<CatalogReducer>>) {
	// Arrange
	let titles = Selector::from_store(&store, |state: &Catalog| Arc::new(state.titles.clone()));
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let handle = titles.subscribe(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	// Act
	store.apply(CatalogAction::Loading(true));
	handle.unsubscribe();
	store.apply(CatalogAction::Loading(false));

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}
