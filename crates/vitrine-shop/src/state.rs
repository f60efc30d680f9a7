//! Product store state and reducer.

use serde::{Deserialize, Serialize};
use vitrine_core::Reducer;
use vitrine_urls::Query;

use crate::catalog::{Categories, Product, ProductDetail};

/// Progress of the most recent load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
	#[default]
	Idle,
	Pending,
	Done,
	Error,
}

/// Everything the storefront pages read.
///
/// Missing fields deserialize to their defaults, so a hydration projection
/// carrying only part of the state can set up a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductState {
	pub products: Vec<Product>,
	pub total_count: usize,
	pub categories: Categories,
	pub current_product: Option<ProductDetail>,
	pub related_products: Vec<Product>,
	pub query: Query,
	pub loading: bool,
	pub error: Option<String>,
	pub status: LoadStatus,
}

impl ProductState {
	/// The part of a home page state handed to the client.
	pub fn home_projection(&self) -> HomeProjection<'_> {
		HomeProjection {
			products: &self.products,
			categories: &self.categories,
			total_count: self.total_count,
			query: &self.query,
		}
	}

	/// The part of a detail page state handed to the client.
	pub fn detail_projection(&self) -> DetailProjection<'_> {
		DetailProjection {
			current_product: self.current_product.as_ref(),
			related_products: &self.related_products,
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProjection<'a> {
	pub products: &'a [Product],
	pub categories: &'a Categories,
	pub total_count: usize,
	pub query: &'a Query,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailProjection<'a> {
	pub current_product: Option<&'a ProductDetail>,
	pub related_products: &'a [Product],
}

/// Incremental updates to a [`ProductState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
	ProductsLoading,
	/// Replaces the listing, e.g. after the filters changed.
	ProductsLoaded {
		products: Vec<Product>,
		total_count: usize,
		query: Query,
	},
	/// Appends the next page of the current listing.
	MoreProductsLoaded {
		products: Vec<Product>,
		total_count: usize,
	},
	CategoriesLoaded(Categories),
	DetailLoading,
	DetailLoaded {
		product: ProductDetail,
		related: Vec<Product>,
	},
	Failed(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductReducer;

impl Reducer for ProductReducer {
	type State = ProductState;
	type Action = ProductAction;

	fn reduce(&self, state: &ProductState, action: ProductAction) -> ProductState {
		let mut next = state.clone();
		match action {
			ProductAction::ProductsLoading => {
				next.loading = true;
				next.error = None;
				next.status = LoadStatus::Pending;
			}
			ProductAction::ProductsLoaded {
				products,
				total_count,
				query,
			} => {
				next.products = products;
				next.total_count = total_count;
				next.query = query;
				next.loading = false;
				next.status = LoadStatus::Done;
			}
			ProductAction::MoreProductsLoaded {
				products,
				total_count,
			} => {
				next.products.extend(products);
				next.total_count = total_count;
				next.loading = false;
				next.status = LoadStatus::Done;
			}
			ProductAction::CategoriesLoaded(categories) => {
				next.categories = categories;
			}
			ProductAction::DetailLoading => {
				next.current_product = None;
				next.related_products.clear();
				next.loading = true;
				next.error = None;
				next.status = LoadStatus::Pending;
			}
			ProductAction::DetailLoaded { product, related } => {
				next.current_product = Some(product);
				next.related_products = related;
				next.loading = false;
				next.status = LoadStatus::Done;
			}
			ProductAction::Failed(message) => {
				next.loading = false;
				next.error = Some(message);
				next.status = LoadStatus::Error;
			}
		}
		next
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn lamp() -> Product {
		Product {
			product_id: "7".to_string(),
			title: "Desk lamp".to_string(),
			..Product::default()
		}
	}

	#[rstest]
	fn test_loading_then_loaded() {
		// Arrange
		let reducer = ProductReducer;
		let start = ProductState::default();

		// Act
		let pending = reducer.reduce(&start, ProductAction::ProductsLoading);
		let done = reducer.reduce(
			&pending,
			ProductAction::ProductsLoaded {
				products: vec![lamp()],
				total_count: 1,
				query: Query::new(),
			},
		);

		// Assert
		assert!(pending.loading);
		assert_eq!(pending.status, LoadStatus::Pending);
		assert!(!done.loading);
		assert_eq!(done.products, vec![lamp()]);
		assert_eq!(done.status, LoadStatus::Done);
	}

	#[rstest]
	fn test_more_products_append() {
		// Arrange
		let reducer = ProductReducer;
		let state = ProductState {
			products: vec![lamp()],
			..ProductState::default()
		};

		// Act
		let next = reducer.reduce(
			&state,
			ProductAction::MoreProductsLoaded {
				products: vec![lamp()],
				total_count: 2,
			},
		);

		// Assert
		assert_eq!(next.products.len(), 2);
		assert_eq!(next.total_count, 2);
	}

	#[rstest]
	fn test_failure_records_error() {
		let next = ProductReducer.reduce(&ProductState::default(), ProductAction::Failed("offline".into()));
		assert_eq!(next.error.as_deref(), Some("offline"));
		assert_eq!(next.status, LoadStatus::Error);
	}

	#[rstest]
	fn test_home_projection_shape() {
		// Arrange
		let state = ProductState {
			products: vec![lamp()],
			total_count: 1,
			loading: true,
			..ProductState::default()
		};

		// Act
		let value = serde_json::to_value(state.home_projection()).unwrap();

		// Assert
		assert_eq!(value["totalCount"], json!(1));
		assert_eq!(value["products"][0]["productId"], json!("7"));
		assert!(value.get("loading").is_none());
		assert!(value.get("currentProduct").is_none());
	}

	#[rstest]
	fn test_projection_restores_into_state() {
		// Arrange
		let state = ProductState {
			current_product: Some(ProductDetail::from_product(lamp())),
			..ProductState::default()
		};
		let value = serde_json::to_value(state.detail_projection()).unwrap();

		// Act
		let restored: ProductState = serde_json::from_value(value).unwrap();

		// Assert
		assert_eq!(restored.current_product, state.current_product);
		assert_eq!(restored.status, LoadStatus::Idle);
	}
}
