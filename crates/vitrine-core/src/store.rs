//! Reducer-driven state container.
//!
//! A [`Store`] owns one immutable state snapshot behind an `Arc`. Every
//! [`Store::dispatch`] produces a new snapshot and then notifies all
//! subscribers synchronously, whether or not the state changed. Consumers
//! that need to skip redundant work compare snapshots themselves, usually
//! through a [`Selector`](crate::Selector).

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::observer::{Listener, Observer, Unsubscribe};

/// Computes the next state for an incremental action.
pub trait Reducer: Send + Sync {
	/// The state held by the store.
	type State: Send + Sync;
	/// Incremental actions understood by the reducer.
	type Action;

	/// Returns the state after applying `action` to `state`.
	fn reduce(&self, state: &Self::State, action: Self::Action) -> Self::State;
}

/// An action delivered to a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<A, S> {
	/// Replace the whole state. Used for hydration and resets.
	Setup(S),
	/// Apply one reducer step.
	Apply(A),
}

/// Store action type for a reducer.
pub type StoreAction<R> = Action<<R as Reducer>::Action, <R as Reducer>::State>;

/// A state container with dispatch-driven mutation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use vitrine_core::{Action, Reducer, Store};
///
/// struct Counter;
///
/// impl Reducer for Counter {
///     type State = i64;
///     type Action = i64;
///
///     fn reduce(&self, state: &i64, delta: i64) -> i64 {
///         state + delta
///     }
/// }
///
/// let store = Store::new(Counter, 0);
/// let notified = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&notified);
/// let _handle = store.subscribe(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// store.dispatch(Action::Apply(5));
/// store.dispatch(Action::Setup(100));
/// assert_eq!(*store.get_state(), 100);
/// assert_eq!(notified.load(Ordering::SeqCst), 2);
/// ```
pub struct Store<R: Reducer> {
	reducer: R,
	state: RwLock<Arc<R::State>>,
	observer: Observer,
}

impl<R: Reducer> Store<R> {
	/// Creates a store holding `initial`.
	pub fn new(reducer: R, initial: R::State) -> Self {
		Self {
			reducer,
			state: RwLock::new(Arc::new(initial)),
			observer: Observer::new(),
		}
	}

	/// Returns the current snapshot.
	pub fn get_state(&self) -> Arc<R::State> {
		Arc::clone(&self.state.read())
	}

	/// Computes the next state and notifies every subscriber.
	///
	/// Subscribers run after the state lock is released, so they may read the
	/// store or dispatch again.
	pub fn dispatch(&self, action: StoreAction<R>) {
		{
			let mut state = self.state.write();
			let next = match action {
				Action::Setup(next) => next,
				Action::Apply(action) => self.reducer.reduce(&state, action),
			};
			*state = Arc::new(next);
		}
		trace!(subscribers = self.observer.len(), "store dispatched");
		self.observer.notify();
	}

	/// Dispatches a reducer step.
	pub fn apply(&self, action: R::Action) {
		self.dispatch(Action::Apply(action));
	}

	/// Replaces the whole state.
	pub fn setup(&self, state: R::State) {
		self.dispatch(Action::Setup(state));
	}

	pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.observer.subscribe(listener)
	}

	pub fn subscribe_listener(&self, listener: Listener) -> Unsubscribe {
		self.observer.subscribe_listener(listener)
	}

	/// The observer notified after each dispatch.
	pub fn observer(&self) -> &Observer {
		&self.observer
	}

	pub fn reducer(&self) -> &R {
		&self.reducer
	}
}

impl<R> fmt::Debug for Store<R>
where
	R: Reducer,
	R::State: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Store")
			.field("state", &*self.state.read())
			.field("subscribers", &self.observer.len())
			.finish()
	}
}
