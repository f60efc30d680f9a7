//! Host settings.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SettingsError};

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "VITRINE_";

/// Settings shared by the HTTP host and the static site generator.
///
/// Every field has a default, so a settings file only lists what it changes.
///
/// # Example
///
/// ```
/// use vitrine_conf::Settings;
///
/// let settings = Settings::from_toml_str("port = 8080\nbase = \"/shop/\"").unwrap();
/// assert_eq!(settings.port, 8080);
/// assert_eq!(settings.base_path(), "/shop");
/// assert_eq!(settings.page_limit, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub host: String,
	pub port: u16,
	/// Public path the site is mounted under.
	pub base: String,
	/// JSON array of catalog items.
	pub items_path: PathBuf,
	/// HTML shell with `<!--app-head-->` and `<!--app-html-->` markers.
	pub template_path: PathBuf,
	/// Static site output root.
	pub output_dir: PathBuf,
	/// Products per listing page when the query gives no `limit`.
	pub page_limit: usize,
	/// Related products shown on a detail page.
	pub related_limit: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 5173,
			base: "/".to_string(),
			items_path: PathBuf::from("data/items.json"),
			template_path: PathBuf::from("index.html"),
			output_dir: PathBuf::from("dist"),
			page_limit: 20,
			related_limit: 20,
		}
	}
}

impl Settings {
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Defaults, then the file if one is given, then the process environment.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let mut settings = match path {
			Some(path) => {
				debug!(path = %path.display(), "loading settings file");
				Self::from_file(path)?
			}
			None => Self::default(),
		};
		settings.apply_env()?;
		Ok(settings)
	}

	/// Overrides fields from `VITRINE_*` variables of the process environment.
	pub fn apply_env(&mut self) -> Result<()> {
		self.apply_env_with(|key| std::env::var(key).ok())
	}

	/// Overrides fields from `VITRINE_*` values supplied by `lookup`.
	///
	/// Recognized keys: `HOST`, `PORT`, `BASE`, `ITEMS_PATH`,
	/// `TEMPLATE_PATH`, `OUTPUT_DIR`, `PAGE_LIMIT`, `RELATED_LIMIT`.
	pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| {
			let key = format!("{}{}", ENV_PREFIX, name);
			lookup(&key).map(|value| (key, value))
		};

		if let Some((_, value)) = var("HOST") {
			self.host = value;
		}
		if let Some((key, value)) = var("PORT") {
			self.port = parse_number(key, &value)?;
		}
		if let Some((_, value)) = var("BASE") {
			self.base = value;
		}
		if let Some((_, value)) = var("ITEMS_PATH") {
			self.items_path = PathBuf::from(value);
		}
		if let Some((_, value)) = var("TEMPLATE_PATH") {
			self.template_path = PathBuf::from(value);
		}
		if let Some((_, value)) = var("OUTPUT_DIR") {
			self.output_dir = PathBuf::from(value);
		}
		if let Some((key, value)) = var("PAGE_LIMIT") {
			self.page_limit = parse_number(key, &value)?;
		}
		if let Some((key, value)) = var("RELATED_LIMIT") {
			self.related_limit = parse_number(key, &value)?;
		}
		Ok(())
	}

	/// The base without its trailing slash; `/` becomes the empty string.
	pub fn base_path(&self) -> &str {
		self.base.trim_end_matches('/')
	}

	/// `host:port` for binding the listener.
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}

fn parse_number<T>(key: String, value: &str) -> Result<T>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	value.trim().parse().map_err(|e: T::Err| SettingsError::InvalidEnv {
		key,
		value_len: value.len(),
		reason: e.to_string(),
	})
}
