//! Listener registry shared by routers and stores.
//!
//! An [`Observer`] holds zero-argument listeners and calls them synchronously,
//! in subscription order, on every [`Observer::notify`]. The listener list is
//! copied before any listener runs, so a listener may subscribe, unsubscribe
//! or read the state that triggered it without deadlocking. Changes made
//! during a notification take effect from the next one.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// A notification callback.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	listeners: Vec<(u64, Listener)>,
}

/// A synchronous listener registry.
///
/// Clones share the same registry.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use vitrine_core::Observer;
///
/// let observer = Observer::new();
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let handle = observer.subscribe(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// observer.notify();
/// handle.unsubscribe();
/// observer.notify();
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone, Default)]
pub struct Observer {
	registry: Arc<Mutex<Registry>>,
}

impl Observer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a listener; it stays registered until the returned handle
	/// is used to unsubscribe.
	pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.subscribe_listener(Arc::new(listener))
	}

	/// Registers an already shared listener.
	pub fn subscribe_listener(&self, listener: Listener) -> Unsubscribe {
		let mut registry = self.registry.lock();
		let id = registry.next_id;
		registry.next_id += 1;
		registry.listeners.push((id, listener));
		Unsubscribe {
			registry: Arc::downgrade(&self.registry),
			id: Some(id),
		}
	}

	/// Calls every listener registered at the time of the call.
	pub fn notify(&self) {
		let listeners: Vec<Listener> = self
			.registry
			.lock()
			.listeners
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		for listener in listeners {
			listener();
		}
	}

	/// Number of registered listeners.
	pub fn len(&self) -> usize {
		self.registry.lock().listeners.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl fmt::Debug for Observer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observer")
			.field("listeners", &self.len())
			.finish()
	}
}

/// Handle returned by [`Observer::subscribe`].
///
/// Dropping the handle leaves the listener registered.
pub struct Unsubscribe {
	registry: Weak<Mutex<Registry>>,
	id: Option<u64>,
}

impl Unsubscribe {
	/// A handle that is not attached to any registry.
	///
	/// Returned by sources that never notify, such as a router resolved once
	/// for a single server render.
	pub fn inert() -> Self {
		Self {
			registry: Weak::new(),
			id: None,
		}
	}

	/// Removes the listener. Calling this after the observer is gone is a no-op.
	pub fn unsubscribe(self) {
		let (Some(id), Some(registry)) = (self.id, self.registry.upgrade()) else {
			return;
		};
		registry
			.lock()
			.listeners
			.retain(|(listener_id, _)| *listener_id != id);
	}

	/// Whether the handle still refers to a live registry.
	pub fn is_attached(&self) -> bool {
		self.id.is_some() && self.registry.strong_count() > 0
	}
}

impl fmt::Debug for Unsubscribe {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Unsubscribe")
			.field("id", &self.id)
			.field("attached", &self.is_attached())
			.finish()
	}
}
