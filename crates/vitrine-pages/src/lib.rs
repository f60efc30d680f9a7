//! Page-level runtime for Vitrine: routers, render context and hydration.
//!
//! The same route table drives two router variants:
//!
//! - [`EphemeralRouter`] resolves a single URL for one server render or one
//!   statically generated page.
//! - [`PersistentRouter`] follows a browser session through a [`History`]
//!   backend, capturing clicks on `data-link` elements and back/forward
//!   traversal.
//!
//! Server renders produce a [`RenderOutput`] which a [`DocumentTemplate`]
//! splices into the HTML shell, carrying the initial state to the client as
//! a [`HydrationScript`]. On the client, [`bootstrap`] consumes the
//! [`HydrationSlot`] exactly once.
//!
//! ## Example
//!
//! ```
//! use vitrine_pages::{EphemeralRouter, RenderContext, RenderContextRelay, Router};
//! use vitrine_urls::{RouteTable, parse_query};
//!
//! let mut table = RouteTable::new();
//! table.register("/", "home");
//! table.register("/product/:id/", "detail");
//! table.register(".*", "not_found");
//!
//! let router = EphemeralRouter::new(table, "/", parse_query("search=lamp"));
//! router.start();
//!
//! let mut relay = RenderContextRelay::new();
//! let heading = relay.scoped(RenderContext::from_router(&router), |ctx| {
//!     format!("Results for {}", ctx.query_value("search").unwrap_or("everything"))
//! });
//! assert_eq!(heading, "Results for lamp");
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod history;
pub mod hydration;
pub mod navigation;
pub mod router;
pub mod ssr;

pub use context::{RenderContext, RenderContextRelay};
pub use document::{DocumentTemplate, HEAD_MARKER, HTML_MARKER};
pub use error::{HydrationError, HydrationResult, NavigationError, NavigationResult};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{
	DEFAULT_ORIGIN, History, LINK_MARKER, LinkActivation, MemoryHistory, NavigationHooks,
};
pub use hydration::{HydrationScript, HydrationSlot, INITIAL_DATA_VAR, bootstrap};
pub use navigation::{GenerationToken, NavigationGeneration};
pub use router::{EphemeralRouter, PersistentRouter, Router};
pub use ssr::{RenderOutput, html_escape};
