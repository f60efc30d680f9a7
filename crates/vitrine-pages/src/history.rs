//! Session history backends.
//!
//! The persistent router talks to the browser through the [`History`] trait.
//! [`BrowserHistory`] drives `window.history` on wasm targets, and
//! [`MemoryHistory`] keeps entries in memory for native builds and tests.
//! Backends report back/forward traversal and marked link activation through
//! the [`NavigationHooks`] installed once by the router.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::NavigationResult;

/// Attribute that marks an element as an in-page navigation link.
pub const LINK_MARKER: &str = "data-link";

/// Origin reported by [`MemoryHistory`] unless configured otherwise.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Access to the session's location and history stack.
pub trait History: Send + Sync {
	/// Scheme, host and port of the session, e.g. `http://localhost:5173`.
	fn origin(&self) -> String;

	/// Current path and search, e.g. `/product/1/?tab=reviews`.
	fn location(&self) -> String;

	/// Appends a history entry and makes it current.
	fn push(&self, url: &str) -> NavigationResult<()>;

	/// Wires back/forward and link activation events to `hooks`.
	///
	/// Called once per router. Listeners stay installed for the life of the
	/// session.
	fn install(&self, hooks: NavigationHooks) {
		let _ = hooks;
	}
}

impl<T: History + ?Sized> History for Arc<T> {
	fn origin(&self) -> String {
		(**self).origin()
	}

	fn location(&self) -> String {
		(**self).location()
	}

	fn push(&self, url: &str) -> NavigationResult<()> {
		(**self).push(url)
	}

	fn install(&self, hooks: NavigationHooks) {
		(**self).install(hooks)
	}
}

type PopStateHook = Arc<dyn Fn() + Send + Sync>;
type LinkHook = Arc<dyn Fn(&mut LinkActivation) + Send + Sync>;

/// Callbacks a history backend invokes on session events.
#[derive(Clone)]
pub struct NavigationHooks {
	on_pop_state: PopStateHook,
	on_link: LinkHook,
}

impl NavigationHooks {
	pub fn new<P, L>(on_pop_state: P, on_link: L) -> Self
	where
		P: Fn() + Send + Sync + 'static,
		L: Fn(&mut LinkActivation) + Send + Sync + 'static,
	{
		Self {
			on_pop_state: Arc::new(on_pop_state),
			on_link: Arc::new(on_link),
		}
	}

	/// Reports a back/forward traversal. The location has already changed.
	pub fn pop_state(&self) {
		(self.on_pop_state)();
	}

	/// Reports an activated link, which the hook may claim.
	pub fn link_activated(&self, activation: &mut LinkActivation) {
		(self.on_link)(activation);
	}
}

impl fmt::Debug for NavigationHooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationHooks").finish_non_exhaustive()
	}
}

/// A click on an element, as seen by the link-capture listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivation {
	marked: bool,
	href: Option<String>,
	default_prevented: bool,
}

impl LinkActivation {
	/// An element (or ancestor) carrying the [`LINK_MARKER`] attribute.
	pub fn marked(href: Option<String>) -> Self {
		Self {
			marked: true,
			href,
			default_prevented: false,
		}
	}

	/// An element without the marker. The router leaves it to the browser.
	pub fn unmarked(href: Option<String>) -> Self {
		Self {
			marked: false,
			href,
			default_prevented: false,
		}
	}

	pub fn is_marked(&self) -> bool {
		self.marked
	}

	pub fn href(&self) -> Option<&str> {
		self.href.as_deref()
	}

	/// Suppresses the browser's own navigation.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented
	}
}

#[derive(Debug)]
struct Entries {
	stack: Vec<String>,
	cursor: usize,
}

/// An in-memory history stack.
///
/// Mirrors the browser's behavior: pushing discards forward entries, and
/// [`back`](Self::back)/[`forward`](Self::forward) move the cursor and fire
/// the pop-state hook without adding entries.
///
/// # Example
///
/// ```
/// use vitrine_pages::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push("/product/1/").unwrap();
/// assert_eq!(history.location(), "/product/1/");
/// assert!(history.back());
/// assert_eq!(history.location(), "/");
/// ```
pub struct MemoryHistory {
	origin: String,
	entries: Mutex<Entries>,
	hooks: Mutex<Option<NavigationHooks>>,
}

impl MemoryHistory {
	/// Starts a session at `initial` under [`DEFAULT_ORIGIN`].
	pub fn new(initial: &str) -> Self {
		Self::with_origin(DEFAULT_ORIGIN, initial)
	}

	pub fn with_origin(origin: &str, initial: &str) -> Self {
		Self {
			origin: origin.trim_end_matches('/').to_string(),
			entries: Mutex::new(Entries {
				stack: vec![initial.to_string()],
				cursor: 0,
			}),
			hooks: Mutex::new(None),
		}
	}

	/// All entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.entries.lock().stack.clone()
	}

	/// Moves one entry back. Returns `false` at the start of the stack.
	pub fn back(&self) -> bool {
		self.traverse(-1)
	}

	/// Moves one entry forward. Returns `false` at the end of the stack.
	pub fn forward(&self) -> bool {
		self.traverse(1)
	}

	fn traverse(&self, delta: isize) -> bool {
		{
			let mut entries = self.entries.lock();
			let Some(target) = entries.cursor.checked_add_signed(delta) else {
				return false;
			};
			if target >= entries.stack.len() {
				return false;
			}
			entries.cursor = target;
		}
		if let Some(hooks) = self.installed_hooks() {
			hooks.pop_state();
		}
		true
	}

	/// Simulates a click, returning the activation after the hook saw it.
	pub fn activate_link(&self, mut activation: LinkActivation) -> LinkActivation {
		if let Some(hooks) = self.installed_hooks() {
			hooks.link_activated(&mut activation);
		}
		activation
	}

	fn installed_hooks(&self) -> Option<NavigationHooks> {
		self.hooks.lock().clone()
	}
}

impl History for MemoryHistory {
	fn origin(&self) -> String {
		self.origin.clone()
	}

	fn location(&self) -> String {
		let entries = self.entries.lock();
		entries.stack[entries.cursor].clone()
	}

	fn push(&self, url: &str) -> NavigationResult<()> {
		let mut entries = self.entries.lock();
		let keep = entries.cursor + 1;
		entries.stack.truncate(keep);
		entries.stack.push(url.to_string());
		entries.cursor = keep;
		debug!(url, depth = entries.stack.len(), "history entry pushed");
		Ok(())
	}

	fn install(&self, hooks: NavigationHooks) {
		*self.hooks.lock() = Some(hooks);
	}
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("origin", &self.origin)
			.field("entries", &*self.entries.lock())
			.finish()
	}
}

/// `window.history` and `window.location` of the running page.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
	pub fn new() -> Self {
		Self
	}
}

#[cfg(target_arch = "wasm32")]
impl History for BrowserHistory {
	fn origin(&self) -> String {
		web_sys::window()
			.and_then(|window| window.location().origin().ok())
			.unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
	}

	fn location(&self) -> String {
		let Some(location) = web_sys::window().map(|window| window.location()) else {
			return "/".to_string();
		};
		let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
		let search = location.search().unwrap_or_default();
		format!("{}{}", pathname, search)
	}

	fn push(&self, url: &str) -> NavigationResult<()> {
		use crate::error::NavigationError;

		let window = web_sys::window()
			.ok_or_else(|| NavigationError::History("window not available".to_string()))?;
		let history = window
			.history()
			.map_err(|e| NavigationError::History(format!("{:?}", e)))?;
		history
			.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
			.map_err(|e| NavigationError::History(format!("{:?}", e)))
	}

	fn install(&self, hooks: NavigationHooks) {
		use tracing::warn;
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let Some(window) = web_sys::window() else {
			warn!("window not available; navigation listeners not installed");
			return;
		};

		// Browser back/forward
		let pop_hooks = hooks.clone();
		let popstate = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			pop_hooks.pop_state();
		}) as Box<dyn FnMut(_)>);
		if let Err(err) =
			window.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
		{
			warn!(?err, "failed to install popstate listener");
		}
		popstate.forget();

		let Some(document) = window.document() else {
			warn!("document not available; link capture not installed");
			return;
		};

		// Delegated link capture
		let selector = format!("[{}]", LINK_MARKER);
		let click = Closure::wrap(Box::new(move |event: web_sys::Event| {
			let Some(element) = event
				.target()
				.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
			else {
				return;
			};
			let Ok(Some(link)) = element.closest(&selector) else {
				return;
			};
			let mut activation = LinkActivation::marked(link.get_attribute("href"));
			hooks.link_activated(&mut activation);
			if activation.is_default_prevented() {
				event.prevent_default();
			}
		}) as Box<dyn FnMut(_)>);
		if let Err(err) = document.add_event_listener_with_callback_and_bool(
			"click",
			click.as_ref().unchecked_ref(),
			true,
		) {
			warn!(?err, "failed to install link capture listener");
		}
		click.forget();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	fn test_push_discards_forward_entries() {
		// Arrange
		let history = MemoryHistory::new("/");
		history.push("/a/").unwrap();
		history.push("/b/").unwrap();
		history.back();

		// Act
		history.push("/c/").unwrap();

		// Assert
		assert_eq!(history.entries(), vec!["/", "/a/", "/c/"]);
		assert!(!history.forward());
	}

	#[rstest]
	fn test_traversal_fires_pop_state_hook() {
		// Arrange
		let history = MemoryHistory::new("/");
		history.push("/a/").unwrap();
		let pops = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&pops);
		history.install(NavigationHooks::new(
			move || {
				counter.fetch_add(1, Ordering::SeqCst);
			},
			|_| {},
		));

		// Act
		let went_back = history.back();
		let went_back_again = history.back();
		let went_forward = history.forward();

		// Assert
		assert!(went_back);
		assert!(!went_back_again);
		assert!(went_forward);
		assert_eq!(pops.load(Ordering::SeqCst), 2);
		assert_eq!(history.location(), "/a/");
	}

	#[rstest]
	fn test_activate_link_without_hooks_is_untouched() {
		let history = MemoryHistory::new("/");
		let activation = history.activate_link(LinkActivation::marked(Some("/a/".to_string())));
		assert!(!activation.is_default_prevented());
	}

	#[rstest]
	fn test_origin_trailing_slash_trimmed() {
		let history = MemoryHistory::with_origin("https://shop.test/", "/");
		assert_eq!(history.origin(), "https://shop.test");
	}
}
