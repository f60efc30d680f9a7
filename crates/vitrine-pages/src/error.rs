//! Error types for navigation and hydration.

use thiserror::Error;

/// A navigation that could not be carried out.
///
/// The persistent router logs these and stays on its previous route; they
/// only reach callers through
/// [`PersistentRouter::navigate_checked`](crate::PersistentRouter::navigate_checked).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// The target could not be parsed relative to the session origin.
	#[error("invalid navigation target '{url}': {reason}")]
	InvalidUrl {
		/// The target after base-path normalization.
		url: String,
		/// Parser message.
		reason: String,
	},

	/// The target resolves to a different origin than the session.
	#[error("navigation target '{url}' leaves origin {origin}")]
	CrossOrigin {
		/// The target after base-path normalization.
		url: String,
		/// The session origin.
		origin: String,
	},

	/// The history backend refused the entry.
	#[error("history update failed: {0}")]
	History(String),
}

/// Failures while producing or consuming the embedded initial-data payload.
#[derive(Debug, Error)]
pub enum HydrationError {
	/// Store state could not be encoded.
	#[error("failed to serialize initial data: {0}")]
	Serialize(#[source] serde_json::Error),

	/// The payload does not decode into the store's state.
	#[error("failed to deserialize initial data: {0}")]
	Deserialize(#[source] serde_json::Error),

	/// The host environment has no readable payload slot.
	#[error("initial data is unavailable: {0}")]
	Unavailable(String),
}

/// Result alias for navigation.
pub type NavigationResult<T> = Result<T, NavigationError>;

/// Result alias for hydration.
pub type HydrationResult<T> = Result<T, HydrationError>;
