//! Integration tests for the session router over an in-memory history.
//!
//! These tests verify:
//! 1. Navigating to the current location pushes nothing but notifies once
//! 2. A malformed target leaves the route in place
//! 3. Back/forward traversal re-resolves without pushing
//! 4. Marked links are claimed, unmarked links are left alone
//! 5. Routes resolve under a base path

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::{fixture, rstest};
use vitrine_pages::{History, LinkActivation, MemoryHistory, PersistentRouter, Router};

type ShopRouter = PersistentRouter<&'static str, Arc<MemoryHistory>>;

struct Session {
	history: Arc<MemoryHistory>,
	router: Arc<ShopRouter>,
	notifications: Arc<AtomicUsize>,
}

impl Session {
	fn notified(&self) -> usize {
		self.notifications.load(Ordering::SeqCst)
	}
}

fn start_session(initial: &str, base: &str) -> Session {
	let history = Arc::new(MemoryHistory::new(initial));
	let router = PersistentRouter::new(Arc::clone(&history), base);
	router.add_route("/", "home");
	router.add_route("/product/:id/", "detail");
	router.add_route(".*", "not_found");
	router.start();

	let notifications = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&notifications);
	// Handle dropped on purpose: the listener stays subscribed.
	let _ = router.subscribe(Arc::new(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	}));

	Session {
		history,
		router,
		notifications,
	}
}

#[fixture]
fn session() -> Session {
	start_session("/", "")
}

#[rstest]
fn test_same_url_navigation_notifies_without_push(session: Session) {
	// Act
	session.router.navigate("/");

	// Assert
	assert_eq!(session.history.entries(), vec!["/"]);
	assert_eq!(session.notified(), 1);
	assert_eq!(session.router.current_match().unwrap().handler, "home");
}

#[rstest]
fn test_malformed_url_keeps_current_route(session: Session) {
	// Arrange
	session.router.navigate("/product/5/");

	// Act
	session.router.navigate("http://[::1");

	// Assert
	assert!(session.router.is_active());
	assert_eq!(session.router.current_match().unwrap().handler, "detail");
	assert_eq!(session.router.params().get("id"), Some("5"));
	assert_eq!(session.history.entries(), vec!["/", "/product/5/"]);
	assert_eq!(session.notified(), 1);
}

#[rstest]
fn test_back_and_forward_re_resolve(session: Session) {
	// Arrange
	session.router.navigate("/product/1/");
	session.router.navigate("/product/2/");

	// Act
	assert!(session.history.back());
	let after_back = session.router.params().get("id").map(str::to_string);
	assert!(session.history.forward());
	let after_forward = session.router.params().get("id").map(str::to_string);

	// Assert
	assert_eq!(after_back.as_deref(), Some("1"));
	assert_eq!(after_forward.as_deref(), Some("2"));
	assert_eq!(session.history.entries().len(), 3);
	assert_eq!(session.notified(), 4);
}

#[rstest]
fn test_marked_link_is_claimed(session: Session) {
	// Act
	let activation = session
		.history
		.activate_link(LinkActivation::marked(Some("/product/9/".to_string())));

	// Assert
	assert!(activation.is_default_prevented());
	assert_eq!(session.history.location(), "/product/9/");
	assert_eq!(session.router.params().get("id"), Some("9"));
}

#[rstest]
#[case(LinkActivation::unmarked(Some("/product/9/".to_string())))]
#[case(LinkActivation::marked(None))]
fn test_other_clicks_are_ignored(session: Session, #[case] click: LinkActivation) {
	// Act
	let activation = session.history.activate_link(click);

	// Assert
	assert!(!activation.is_default_prevented());
	assert_eq!(session.history.entries(), vec!["/"]);
	assert_eq!(session.notified(), 0);
}

#[rstest]
fn test_unknown_path_falls_through_to_catch_all(session: Session) {
	session.router.navigate("/missing/page");
	assert_eq!(session.router.current_match().unwrap().handler, "not_found");
}

#[rstest]
fn test_routes_resolve_under_base_path() {
	// Arrange
	let session = start_session("/shop/", "/shop/");

	// Act
	let initial = session.router.current_match().map(|route| route.handler);
	session.router.navigate("/product/3/");

	// Assert
	assert_eq!(initial, Some("home"));
	assert_eq!(session.history.location(), "/shop/product/3/");
	assert_eq!(session.router.params().get("id"), Some("3"));
}

#[rstest]
fn test_query_travels_with_navigation(session: Session) {
	// Act
	session.router.navigate("/?search=shoes&limit=10");

	// Assert
	let query = session.router.query();
	assert_eq!(query.get("search").map(String::as_str), Some("shoes"));
	assert_eq!(query.get("limit").map(String::as_str), Some("10"));
	assert_eq!(session.router.current_match().unwrap().handler, "home");
}

#[rstest]
fn test_unsubscribed_listener_is_not_called(session: Session) {
	// Arrange
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let handle = session.router.subscribe(Arc::new(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	}));

	// Act
	session.router.navigate("/product/1/");
	handle.unsubscribe();
	session.router.navigate("/product/2/");

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert_eq!(session.notified(), 2);
}
