//! Configuration for Vitrine hosts.
//!
//! [`Settings`] are read from an optional TOML file and then overridden by
//! `VITRINE_`-prefixed environment variables.

pub mod error;
pub mod settings;

pub use error::{Result, SettingsError};
pub use settings::{ENV_PREFIX, Settings};
