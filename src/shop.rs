//! The reference storefront.
//!
//! Available with the `shop` feature (enabled by default).

pub use vitrine_shop::*;
