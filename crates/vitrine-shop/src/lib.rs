//! Reference storefront built on Vitrine.
//!
//! Plays the collaborator roles around the routing and state layer: a
//! catalog to load data from, page views, head metadata, the server render
//! entrypoint, the client session, a static site job and an HTTP host.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use vitrine_pages::DocumentTemplate;
//! use vitrine_shop::{Catalog, Product, Renderer};
//! use vitrine_urls::parse_query;
//!
//! let catalog = Catalog::new(vec![Product {
//!     product_id: "1".into(),
//!     title: "Trail shoes".into(),
//!     ..Product::default()
//! }]);
//! let renderer = Renderer::new(Arc::new(catalog));
//! let output = renderer.render("/", &parse_query("search=shoes")).unwrap();
//!
//! let template = DocumentTemplate::new("<head><!--app-head--></head><div id=\"root\"><!--app-html--></div>");
//! let html = template.assemble(&output);
//! assert!(html.contains("<title>shoes search results - Shop</title>"));
//! assert!(html.contains("window.__INITIAL_DATA__"));
//! ```

pub mod catalog;
pub mod client;
pub mod error;
pub mod logging;
pub mod meta;
pub mod render;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod state;
pub mod static_site;
pub mod views;

pub use catalog::{
	Catalog, Categories, CategoryLeaf, DEFAULT_PAGE_LIMIT, DEFAULT_RELATED_LIMIT, ListingParams,
	Pagination, Product, ProductDetail, ProductPage, SortOrder,
};
#[cfg(target_arch = "wasm32")]
pub use client::mount;
pub use client::{ClientApp, PendingLoad};
pub use error::{CatalogError, RenderError, SiteError};
pub use render::{CLIENT_ROUTES, Renderer, SERVER_ROUTES, server_routes};
#[cfg(not(target_arch = "wasm32"))]
pub use server::{ShopServer, ShopService};
pub use state::{LoadStatus, ProductAction, ProductReducer, ProductState};
pub use static_site::{SitePage, SiteReport, StaticSite};
pub use views::Page;
