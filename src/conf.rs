//! Runtime settings loaded from TOML and `VITRINE_*` variables.

pub use vitrine_conf::*;
