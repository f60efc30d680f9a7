//! Per-render route context.
//!
//! A [`RenderContext`] carries the resolved parameters and query of one
//! render into the view layer. It is passed explicitly; the
//! [`RenderContextRelay`] owned by a render holds it only while the views
//! run and is emptied afterwards, including when a view fails or panics.

use vitrine_urls::{Params, Query, RouteMatch};

use crate::router::Router;

/// Parameters and query visible to views during one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
	pub query: Query,
	pub params: Params,
}

impl RenderContext {
	pub fn new(query: Query, params: Params) -> Self {
		Self { query, params }
	}

	pub fn from_match<H>(route: &RouteMatch<H>) -> Self {
		Self {
			query: route.query.clone(),
			params: route.params.clone(),
		}
	}

	/// Snapshot of a router's current route.
	pub fn from_router<H>(router: &dyn Router<H>) -> Self {
		Self {
			query: router.query(),
			params: router.params(),
		}
	}

	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name)
	}

	/// A query value, treating an empty value as absent.
	pub fn query_value(&self, name: &str) -> Option<&str> {
		self.query
			.get(name)
			.map(String::as_str)
			.filter(|value| !value.is_empty())
	}
}

/// Holds the context of the render in progress.
///
/// # Example
///
/// ```
/// use vitrine_pages::{RenderContext, RenderContextRelay};
///
/// let mut relay = RenderContextRelay::new();
/// let markup = relay.scoped(RenderContext::default(), |ctx| {
///     format!("{} params", ctx.params.len())
/// });
/// assert_eq!(markup, "0 params");
/// assert!(!relay.is_set());
/// ```
#[derive(Debug, Default)]
pub struct RenderContextRelay {
	slot: Option<RenderContext>,
}

impl RenderContextRelay {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, context: RenderContext) {
		self.slot = Some(context);
	}

	pub fn get(&self) -> Option<&RenderContext> {
		self.slot.as_ref()
	}

	pub fn clear(&mut self) {
		self.slot = None;
	}

	pub fn is_set(&self) -> bool {
		self.slot.is_some()
	}

	/// Sets `context`, runs `render` with it, and clears the slot when
	/// `render` returns or unwinds.
	pub fn scoped<T>(&mut self, context: RenderContext, render: impl FnOnce(&RenderContext) -> T) -> T {
		let mut guard = ClearGuard {
			slot: &mut self.slot,
		};
		let context = guard.slot.insert(context);
		render(context)
	}
}

struct ClearGuard<'a> {
	slot: &'a mut Option<RenderContext>,
}

impl Drop for ClearGuard<'_> {
	fn drop(&mut self) {
		*self.slot = None;
	}
}
