//! Hydration bridge.
//!
//! The server embeds a projection of its store state in the document with
//! [`HydrationScript::render`]. On the client, [`bootstrap`] moves that
//! payload from the [`HydrationSlot`] into the session store as a `Setup`
//! action. The slot is emptied in the process, so only the first bootstrap
//! of a page load ever sees server data.

mod script;
mod slot;

pub use script::HydrationScript;
pub use slot::HydrationSlot;

use serde::de::DeserializeOwned;
use tracing::debug;
use vitrine_core::{Reducer, Store};

use crate::error::{HydrationError, HydrationResult};

/// The global JavaScript variable carrying the initial data.
pub const INITIAL_DATA_VAR: &str = "__INITIAL_DATA__";

/// Consumes the slot's payload into `store`.
///
/// Returns `Ok(true)` when a payload was applied and `Ok(false)` when the
/// slot was empty, in which case the caller loads its data itself. The slot
/// is empty afterwards in every case, including a decode failure.
///
/// The payload is usually a projection of the state, so `State` should fill
/// missing fields with defaults (`#[serde(default)]`).
pub fn bootstrap<R>(slot: &HydrationSlot, store: &Store<R>) -> HydrationResult<bool>
where
	R: Reducer,
	R::State: DeserializeOwned,
{
	let Some(payload) = slot.take() else {
		debug!("no initial data; client loads its own");
		return Ok(false);
	};
	let state: R::State = serde_json::from_value(payload).map_err(HydrationError::Deserialize)?;
	store.setup(state);
	debug!("store hydrated from initial data");
	Ok(true)
}
