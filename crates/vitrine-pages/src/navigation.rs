//! Generation tokens for navigation-triggered loads.
//!
//! Each navigation that starts a data load takes a fresh token. When the
//! load finishes it may only write its result if no later navigation has
//! taken a token since; otherwise the result is dropped. The last navigation
//! always wins, and an earlier load that finishes late cannot overwrite it.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Identifies one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(u64);

impl GenerationToken {
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Monotonic navigation counter.
///
/// # Example
///
/// ```
/// use vitrine_pages::NavigationGeneration;
///
/// let generation = NavigationGeneration::new();
/// let first = generation.advance();
/// let second = generation.advance();
///
/// assert_eq!(generation.commit(first, || "stale"), None);
/// assert_eq!(generation.commit(second, || "fresh"), Some("fresh"));
/// ```
#[derive(Debug, Default)]
pub struct NavigationGeneration {
	current: AtomicU64,
}

impl NavigationGeneration {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new navigation, superseding every earlier token.
	pub fn advance(&self) -> GenerationToken {
		GenerationToken(self.current.fetch_add(1, Ordering::SeqCst) + 1)
	}

	/// The most recently issued token.
	pub fn current(&self) -> GenerationToken {
		GenerationToken(self.current.load(Ordering::SeqCst))
	}

	pub fn is_current(&self, token: GenerationToken) -> bool {
		self.current() == token
	}

	/// Runs `apply` only if `token` is still the latest navigation.
	pub fn commit<T>(&self, token: GenerationToken, apply: impl FnOnce() -> T) -> Option<T> {
		if self.is_current(token) {
			Some(apply())
		} else {
			debug!(
				token = token.get(),
				current = self.current().get(),
				"discarding result of superseded navigation"
			);
			None
		}
	}
}
