//! Dual-mode routing, render context, navigation and hydration.
//!
//! ## Architecture
//!
//! - **Routers**: an ephemeral router per server render, a persistent router per browser session
//! - **Render context**: route params and query handed to a render through an owned relay
//! - **Hydration**: the initial-data script on the server, a one-shot slot on the client
//!
//! ## Example
//!
//! ```rust
//! use vitrine::pages::{EphemeralRouter, Router};
//! use vitrine::urls::{RouteTable, parse_query};
//!
//! let mut routes = RouteTable::new();
//! routes.register("/product/:id/", "detail");
//! let router = EphemeralRouter::new(routes, "/product/7/", parse_query(""));
//! router.start();
//! assert_eq!(router.params().get("id"), Some("7"));
//! ```

pub use vitrine_pages::*;
