//! Client side of the hydration bridge.

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::HydrationResult;

use super::HydrationScript;

/// The single initial-data slot of a page load.
///
/// Holds at most one payload. [`take`](Self::take) empties the slot, so the
/// payload is consumed exactly once and later navigations never see it.
#[derive(Debug, Default)]
pub struct HydrationSlot {
	payload: Mutex<Option<Value>>,
}

impl HydrationSlot {
	/// An empty slot: the page was not server rendered.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_payload(payload: Value) -> Self {
		Self {
			payload: Mutex::new(Some(payload)),
		}
	}

	/// Reads the payload embedded in a rendered document, if any.
	pub fn from_document(document: &str) -> HydrationResult<Self> {
		Ok(Self {
			payload: Mutex::new(HydrationScript::extract(document)?),
		})
	}

	/// Moves `window.__INITIAL_DATA__` into a slot and deletes the global.
	#[cfg(target_arch = "wasm32")]
	pub fn from_window() -> HydrationResult<Self> {
		use super::INITIAL_DATA_VAR;
		use crate::error::HydrationError;

		let window = web_sys::window()
			.ok_or_else(|| HydrationError::Unavailable("window not available".to_string()))?;
		let key = wasm_bindgen::JsValue::from_str(INITIAL_DATA_VAR);
		let global = js_sys::Reflect::get(&window, &key)
			.map_err(|e| HydrationError::Unavailable(format!("{:?}", e)))?;

		if global.is_undefined() || global.is_null() {
			return Ok(Self::new());
		}

		// The global is gone even if reading it back fails.
		let _ = js_sys::Reflect::delete_property(&window, &key);

		let json = js_sys::JSON::stringify(&global)
			.map_err(|e| HydrationError::Unavailable(format!("{:?}", e)))?
			.as_string()
			.ok_or_else(|| HydrationError::Unavailable("payload is not a string".to_string()))?;
		let payload = serde_json::from_str(&json).map_err(HydrationError::Deserialize)?;
		Ok(Self::with_payload(payload))
	}

	/// Non-WASM version that returns an empty slot.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn from_window() -> HydrationResult<Self> {
		Ok(Self::new())
	}

	/// Places a payload in the slot, replacing any unconsumed one.
	pub fn install(&self, payload: Value) {
		*self.payload.lock() = Some(payload);
	}

	pub fn is_present(&self) -> bool {
		self.payload.lock().is_some()
	}

	/// A copy of the payload, leaving it in place.
	pub fn peek(&self) -> Option<Value> {
		self.payload.lock().clone()
	}

	/// Removes and returns the payload.
	pub fn take(&self) -> Option<Value> {
		self.payload.lock().take()
	}
}

impl From<Value> for HydrationSlot {
	fn from(payload: Value) -> Self {
		Self::with_payload(payload)
	}
}
