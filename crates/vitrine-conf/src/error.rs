//! Settings errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("Failed to read settings file '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid settings file: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {reason}")]
	InvalidEnv {
		key: String,
		value_len: usize,
		reason: String,
	},
}

pub type Result<T> = std::result::Result<T, SettingsError>;
