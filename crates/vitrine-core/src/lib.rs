//! Reactive primitives for Vitrine.
//!
//! - [`Observer`]: synchronous listener registry with explicit unsubscribe handles
//! - [`Store`]: reducer-driven state container that notifies on every dispatch
//! - [`SnapshotCache`] and [`Selector`]: identity-stable derived values
//!
//! One store instance belongs to one execution context: a single server
//! render or a single browser session. Nothing in this crate is global.

pub mod observer;
pub mod snapshot;
pub mod store;

pub use observer::{Listener, Observer, Unsubscribe};
pub use snapshot::{Selector, SnapshotCache};
pub use store::{Action, Reducer, Store, StoreAction};
