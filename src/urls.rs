//! Path patterns, route tables and query helpers.

pub use vitrine_urls::*;
