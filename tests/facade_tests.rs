//! Checks that the facade exposes a working stack end to end.

use std::sync::Arc;

use rstest::rstest;
use vitrine::pages::MemoryHistory;
use vitrine::prelude::*;
use vitrine::urls::parse_query;

#[rstest]
#[case("/", "search=apron", "<title>apron search results - Shop</title>")]
#[case("/", "category1=Home&category2=Kitchen", "<title>Home Kitchen - Shop</title>")]
#[case("/product/7/", "", "<title>Linen apron - Shop</title>")]
#[case("/nowhere/", "", "<title>404 - Not Found</title>")]
fn test_render_titles(#[case] url: &str, #[case] query: &str, #[case] title: &str) {
	// Arrange
	let catalog = Catalog::new(vec![Product {
		product_id: "7".to_string(),
		title: "Linen apron".to_string(),
		category1: "Home".to_string(),
		category2: "Kitchen".to_string(),
		..Product::default()
	}]);
	let renderer = Renderer::new(Arc::new(catalog));

	// Act
	let output = renderer.render(url, &parse_query(query)).unwrap();

	// Assert
	assert!(output.head_metadata.contains(title));
}

#[rstest]
fn test_document_round_trip_into_client() {
	// Arrange
	let catalog = Arc::new(Catalog::new(vec![Product {
		product_id: "7".to_string(),
		title: "Linen apron".to_string(),
		..Product::default()
	}]));
	let renderer = Renderer::new(Arc::clone(&catalog));
	let template = DocumentTemplate::new("<head><!--app-head--></head><div id=\"root\"><!--app-html--></div>");
	let html = template.assemble(&renderer.render("/product/7/", &Query::new()).unwrap());
	let slot = HydrationSlot::from_document(&html).unwrap();

	// Act
	let app = ClientApp::bootstrap(Arc::new(MemoryHistory::new("/product/7/")), "", &slot, catalog);

	// Assert
	let state = app.state();
	let detail = state.current_product.as_ref().unwrap();
	assert_eq!(detail.product.title, "Linen apron");
	assert!(app.render().contains("data-product-id=\"7\""));
}

#[test]
fn test_serialized_state_shape() {
	let state = ProductState {
		total_count: 3,
		..ProductState::default()
	};
	let value = serde_json::to_value(&state).unwrap();
	assert_eq!(value["totalCount"], 3);
	assert_eq!(value["status"], serde_json::json!("idle"));
}
