//! Reactive state primitives.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vitrine::core::{Observer, Store};
//! ```

pub use vitrine_core::*;
