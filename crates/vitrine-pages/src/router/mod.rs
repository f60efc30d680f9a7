//! Router contract and its two variants.
//!
//! - [`EphemeralRouter`]: resolves one URL once, for a single server render
//!   or static page. Navigation and subscriptions are inert.
//! - [`PersistentRouter`]: lives for a browser session, pushes history
//!   entries, follows back/forward and captures marked link clicks.
//!
//! Which variant runs is decided where the router is constructed, not by
//! probing the environment at runtime. Consumers that only read the current
//! route take `&dyn Router<H>`.

mod ephemeral;
mod persistent;

pub use ephemeral::EphemeralRouter;
pub use persistent::PersistentRouter;

use vitrine_core::{Listener, Unsubscribe};
use vitrine_urls::{Params, Query, RouteMatch};

/// Operations shared by both router variants.
pub trait Router<H> {
	/// The route the router currently sits on. `None` means no route matched,
	/// or the router has not started.
	fn current_match(&self) -> Option<RouteMatch<H>>;

	/// Resolves the initial location.
	fn start(&self);

	/// Moves to `url`. Failures are logged and leave the current route in place.
	fn navigate(&self, url: &str);

	/// Registers a listener called after every route transition.
	fn subscribe(&self, listener: Listener) -> Unsubscribe;

	/// Parameters of the current route.
	fn params(&self) -> Params {
		self.current_match()
			.map(|route| route.params)
			.unwrap_or_default()
	}

	/// Query of the current location.
	fn query(&self) -> Query {
		self.current_match()
			.map(|route| route.query)
			.unwrap_or_default()
	}
}
