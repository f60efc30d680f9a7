//! Path template compilation.
//!
//! Templates are written with `:name` placeholders, e.g. `/product/:id/`.
//! Each placeholder becomes a capture group matching one run of non-slash
//! characters, literal slashes are escaped, and the expression is anchored at
//! both ends. Any other literal text is inserted into the expression verbatim,
//! so a template of `.*` compiles to a catch-all route.

use crate::error::{PatternError, Result};
use crate::params::Params;

/// Maximum allowed length for a path template in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed size for a compiled expression (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Capture group substituted for every `:name` placeholder.
const PARAM_GROUP: &str = "([^/]+)";

/// A compiled path template.
///
/// # Example
///
/// ```
/// use vitrine_urls::PathPattern;
///
/// let pattern = PathPattern::new("/product/:id/").unwrap();
/// let params = pattern.matches("/product/42/").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(pattern.matches("/product/42").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The template as registered.
	pattern: String,
	/// Base path prefixed to the expression, without trailing slash.
	base: String,
	regex: regex::Regex,
	/// Parameter names in template order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a template with no base path.
	///
	/// # Errors
	///
	/// - [`PatternError::TooLong`] if the template exceeds 1024 bytes
	/// - [`PatternError::DuplicateParam`] if a placeholder name repeats
	/// - [`PatternError::InvalidPattern`] if the literal text is not a valid expression
	pub fn new(pattern: &str) -> Result<Self> {
		Self::with_base(pattern, "")
	}

	/// Compiles a template that only matches paths under `base`.
	///
	/// A trailing slash on `base` is ignored, so `/shop/` and `/shop` are
	/// equivalent. The base itself is matched literally.
	pub fn with_base(pattern: &str, base: &str) -> Result<Self> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let base = base.trim_end_matches('/');
		let (body, param_names) = Self::compile_pattern(pattern)?;
		let regex_str = format!("^{}{}$", regex::escape(base), body);

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::InvalidPattern {
				pattern: pattern.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Self {
			pattern: pattern.to_string(),
			base: base.to_string(),
			regex,
			param_names,
		})
	}

	/// Translates a template into an unanchored expression body.
	fn compile_pattern(pattern: &str) -> Result<(String, Vec<String>)> {
		let mut body = String::with_capacity(pattern.len() * 2);
		let mut param_names: Vec<String> = Vec::new();
		let mut chars = pattern.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				':' if chars.peek().copied().is_some_and(is_name_char) => {
					let mut name = String::new();
					while let Some(&next) = chars.peek() {
						if !is_name_char(next) {
							break;
						}
						name.push(next);
						chars.next();
					}

					if param_names.contains(&name) {
						return Err(PatternError::DuplicateParam {
							pattern: pattern.to_string(),
							name,
						});
					}
					param_names.push(name);
					body.push_str(PARAM_GROUP);
				}
				'/' => body.push_str("\\/"),
				_ => body.push(c),
			}
		}

		Ok((body, param_names))
	}

	/// Returns the template as registered.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the base path the pattern is anchored under.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Returns the parameter names in template order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns the anchored expression source.
	pub fn as_regex_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Matches a full path, pairing each capture with its parameter name.
	///
	/// Literal groups written into the template are not named and are skipped;
	/// pairing is by position among the placeholder groups.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let caps = self.regex.captures(path)?;
		let mut params = Params::new();
		// Placeholder groups are the only groups when the template has no
		// literal parentheses, which is the supported form.
		let groups = caps.iter().skip(1).flatten();
		for (name, value) in self.param_names.iter().zip(groups) {
			params.push(name.as_str(), value.as_str());
		}
		Some(params)
	}

	/// Checks if the pattern accepts `path`.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Builds a path from the template by substituting every placeholder.
	///
	/// Returns `None` when a placeholder has no value in `params`. The base
	/// path is not included.
	pub fn reverse(&self, params: &Params) -> Option<String> {
		let mut result = String::with_capacity(self.pattern.len());
		let mut chars = self.pattern.chars().peekable();

		while let Some(c) = chars.next() {
			if c == ':' && chars.peek().copied().is_some_and(is_name_char) {
				let mut name = String::new();
				while let Some(&next) = chars.peek() {
					if !is_name_char(next) {
						break;
					}
					name.push(next);
					chars.next();
				}
				result.push_str(params.get(&name)?);
			} else {
				result.push(c);
			}
		}

		Some(result)
	}
}

fn is_name_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern && self.base == other.base
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}", self.base, self.pattern)
	}
}
