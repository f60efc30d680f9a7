//! # Vitrine
//!
//! Dual-mode routing, reactive state and hydration for server-rendered
//! storefronts.
//!
//! One route table drives two routers: an ephemeral router that resolves a
//! single URL during a server render or static generation, and a persistent
//! router that follows a browser session. Stores are created per render or
//! per session, so concurrent renders never share state.
//!
//! ## Crates
//!
//! - [`urls`] - path patterns, route tables, query helpers
//! - [`core`] - observers, reducer stores, snapshot selectors
//! - [`pages`] - routers, render context, navigation, hydration, document assembly
//! - [`conf`] - settings
//! - [`shop`] - the reference storefront (feature `shop`)
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "shop")]
//! # {
//! use std::sync::Arc;
//! use vitrine::prelude::*;
//!
//! let catalog = Catalog::new(vec![Product {
//!     product_id: "7".into(),
//!     title: "Linen apron".into(),
//!     ..Product::default()
//! }]);
//! let renderer = Renderer::new(Arc::new(catalog));
//! let output = renderer.render("/product/7/", &Query::new()).unwrap();
//! assert!(output.head_metadata.starts_with("<title>Linen apron - Shop</title>"));
//! # }
//! ```

pub mod conf;
pub mod core;
pub mod pages;
#[cfg(feature = "shop")]
pub mod shop;
pub mod urls;

pub use vitrine_conf::{Settings, SettingsError};
pub use vitrine_core::{Observer, Reducer, Selector, Store};
pub use vitrine_pages::{
	DocumentTemplate, EphemeralRouter, HydrationScript, HydrationSlot, PersistentRouter,
	RenderContext, RenderOutput, Router,
};
pub use vitrine_urls::{Params, Query, RouteMatch, RouteTable};

/// Common imports for applications built on Vitrine.
pub mod prelude {
	pub use crate::{
		DocumentTemplate, EphemeralRouter, HydrationScript, HydrationSlot, Observer, Params,
		PersistentRouter, Query, Reducer, RenderContext, RenderOutput, RouteMatch, RouteTable,
		Router, Selector, Settings, Store,
	};

	#[cfg(feature = "shop")]
	pub use vitrine_shop::{Catalog, ClientApp, Page, Product, ProductState, Renderer, StaticSite};
}
