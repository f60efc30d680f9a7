//! Error types for pattern compilation.

use thiserror::Error;

/// Errors raised while compiling a path template.
///
/// Route registration through [`RouteTable::register`](crate::RouteTable::register)
/// never surfaces these; a template that fails here is stored as a route that
/// never matches. [`RouteTable::try_register`](crate::RouteTable::try_register)
/// and [`PathPattern::new`](crate::PathPattern::new) return them directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// The template exceeds the maximum accepted length.
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Length of the rejected template in bytes.
		length: usize,
		/// Maximum accepted length in bytes.
		max: usize,
	},

	/// The same `:name` token appears more than once in one template.
	#[error("parameter ':{name}' appears more than once in pattern '{pattern}'")]
	DuplicateParam {
		/// The offending template.
		pattern: String,
		/// The repeated parameter name.
		name: String,
	},

	/// The generated expression was rejected by the regex engine.
	#[error("pattern '{pattern}' does not compile: {reason}")]
	InvalidPattern {
		/// The offending template.
		pattern: String,
		/// Message from the regex engine.
		reason: String,
	},
}

/// Result alias for pattern compilation.
pub type Result<T> = std::result::Result<T, PatternError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_too_long_display() {
		// Arrange
		let err = PatternError::TooLong {
			length: 2048,
			max: 1024,
		};

		// Act
		let message = err.to_string();

		// Assert
		assert!(message.contains("2048"));
		assert!(message.contains("1024"));
	}

	#[rstest]
	fn test_duplicate_param_display() {
		// Arrange
		let err = PatternError::DuplicateParam {
			pattern: "/a/:id/b/:id/".to_string(),
			name: "id".to_string(),
		};

		// Act
		let message = err.to_string();

		// Assert
		assert_eq!(
			message,
			"parameter ':id' appears more than once in pattern '/a/:id/b/:id/'"
		);
	}
}
