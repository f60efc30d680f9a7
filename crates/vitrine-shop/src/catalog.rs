//! Catalog data and the queries the pages run against it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrine_urls::Query;

use crate::error::{CatalogError, CatalogResult};

/// Products per page when the query does not say otherwise.
pub const DEFAULT_PAGE_LIMIT: usize = 20;
/// Related products shown on a detail page.
pub const DEFAULT_RELATED_LIMIT: usize = 20;

/// One catalog item, as stored in the items file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
	pub title: String,
	pub link: String,
	pub image: String,
	/// Lowest price, as a decimal string.
	pub lprice: String,
	pub hprice: String,
	pub mall_name: String,
	pub product_id: String,
	pub product_type: String,
	pub brand: String,
	pub maker: String,
	pub category1: String,
	pub category2: String,
	pub category3: String,
	pub category4: String,
}

impl Product {
	/// Numeric lowest price. Unparseable prices count as zero.
	pub fn price(&self) -> i64 {
		self.lprice.trim().parse().unwrap_or(0)
	}

	fn matches_search(&self, needle: &str) -> bool {
		self.title.to_lowercase().contains(needle) || self.brand.to_lowercase().contains(needle)
	}
}

/// A product with the fields only the detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
	#[serde(flatten)]
	pub product: Product,
	pub description: String,
	pub rating: u8,
	pub review_count: u32,
	pub stock: u32,
}

impl ProductDetail {
	/// Derives the detail fields from the product itself, so every render of
	/// the same product agrees.
	pub fn from_product(product: Product) -> Self {
		let seed = fnv1a(product.product_id.as_bytes());
		let description = format!(
			"Detailed description of {}. A quality product from {}, well rated by customers.",
			product.title, product.brand
		);
		Self {
			description,
			rating: 4 + (seed % 2) as u8,
			review_count: 50 + (seed % 1000) as u32,
			stock: 10 + ((seed >> 16) % 100) as u32,
			product,
		}
	}
}

fn fnv1a(bytes: &[u8]) -> u64 {
	bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
		(hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
	})
}

/// Leaf of the category tree; serialized as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLeaf {}

/// `category1 -> category2 -> {}`.
pub type Categories = BTreeMap<String, BTreeMap<String, CategoryLeaf>>;

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
	#[default]
	PriceAsc,
	PriceDesc,
	NameAsc,
	NameDesc,
}

impl SortOrder {
	/// Parses a `sort` query value; unknown values sort by ascending price.
	pub fn from_param(value: &str) -> Self {
		match value {
			"price_desc" => Self::PriceDesc,
			"name_asc" => Self::NameAsc,
			"name_desc" => Self::NameDesc,
			_ => Self::PriceAsc,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::PriceAsc => "price_asc",
			Self::PriceDesc => "price_desc",
			Self::NameAsc => "name_asc",
			Self::NameDesc => "name_desc",
		}
	}
}

/// Filters and paging for a product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
	pub limit: usize,
	pub page: usize,
	pub search: String,
	pub category1: String,
	pub category2: String,
	pub sort: SortOrder,
}

impl Default for ListingParams {
	fn default() -> Self {
		Self {
			limit: DEFAULT_PAGE_LIMIT,
			page: 1,
			search: String::new(),
			category1: String::new(),
			category2: String::new(),
			sort: SortOrder::default(),
		}
	}
}

impl ListingParams {
	/// Reads `limit`, `current`, `search`, `category1`, `category2` and
	/// `sort` from a URL query. Missing or non-positive numbers fall back to
	/// `default_limit` and page 1.
	pub fn from_query(query: &Query, default_limit: usize) -> Self {
		let number = |key: &str| {
			query
				.get(key)
				.and_then(|value| value.trim().parse::<usize>().ok())
				.filter(|value| *value > 0)
		};
		let text = |key: &str| query.get(key).cloned().unwrap_or_default();

		Self {
			limit: number("limit").unwrap_or(default_limit.max(1)),
			page: number("current").unwrap_or(1),
			search: text("search"),
			category1: text("category1"),
			category2: text("category2"),
			sort: query
				.get("sort")
				.map(|value| SortOrder::from_param(value))
				.unwrap_or_default(),
		}
	}
}

/// Paging facts for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub page: usize,
	pub limit: usize,
	pub total: usize,
	pub total_pages: usize,
	pub has_next: bool,
	pub has_prev: bool,
}

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
	pub products: Vec<Product>,
	pub pagination: Pagination,
}

/// The immutable product catalog shared by every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
	items: Vec<Product>,
}

impl Catalog {
	pub fn new(items: Vec<Product>) -> Self {
		Self { items }
	}

	/// Parses a JSON array of items.
	pub fn from_json_str(source: &str) -> CatalogResult<Self> {
		Ok(Self::new(serde_json::from_str(source)?))
	}

	pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let catalog = Self::from_json_str(&source)?;
		debug!(path = %path.display(), items = catalog.len(), "catalog loaded");
		Ok(catalog)
	}

	pub fn items(&self) -> &[Product] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Filters, sorts and pages the catalog.
	///
	/// # Example
	///
	/// ```
	/// use vitrine_shop::{Catalog, ListingParams, Product};
	///
	/// let catalog = Catalog::new(vec![
	///     Product { title: "Canvas shoes".into(), lprice: "30000".into(), ..Product::default() },
	///     Product { title: "Desk lamp".into(), lprice: "12000".into(), ..Product::default() },
	/// ]);
	/// let page = catalog.list(&ListingParams { search: "SHOES".into(), ..ListingParams::default() });
	/// assert_eq!(page.products.len(), 1);
	/// assert_eq!(page.pagination.total, 1);
	/// ```
	pub fn list(&self, params: &ListingParams) -> ProductPage {
		let needle = params.search.to_lowercase();
		let mut filtered: Vec<&Product> = self
			.items
			.iter()
			.filter(|item| needle.is_empty() || item.matches_search(&needle))
			.filter(|item| params.category1.is_empty() || item.category1 == params.category1)
			.filter(|item| params.category2.is_empty() || item.category2 == params.category2)
			.collect();

		match params.sort {
			SortOrder::PriceAsc => filtered.sort_by_key(|item| item.price()),
			SortOrder::PriceDesc => filtered.sort_by_key(|item| std::cmp::Reverse(item.price())),
			SortOrder::NameAsc => filtered.sort_by(|a, b| a.title.cmp(&b.title)),
			SortOrder::NameDesc => filtered.sort_by(|a, b| b.title.cmp(&a.title)),
		}

		let limit = params.limit.max(1);
		let page = params.page.max(1);
		let total = filtered.len();
		let start = (page - 1).saturating_mul(limit);
		let end = start.saturating_add(limit);

		ProductPage {
			products: filtered
				.into_iter()
				.skip(start)
				.take(limit)
				.cloned()
				.collect(),
			pagination: Pagination {
				page,
				limit,
				total,
				total_pages: total.div_ceil(limit),
				has_next: end < total,
				has_prev: page > 1,
			},
		}
	}

	/// The category tree over all items.
	pub fn categories(&self) -> Categories {
		let mut categories = Categories::new();
		for item in &self.items {
			let children = categories.entry(item.category1.clone()).or_default();
			if !item.category2.is_empty() {
				children.entry(item.category2.clone()).or_default();
			}
		}
		categories
	}

	pub fn find(&self, product_id: &str) -> Option<&Product> {
		self.items.iter().find(|item| item.product_id == product_id)
	}

	/// The product with its detail fields, or `None` if the id is unknown.
	pub fn detail(&self, product_id: &str) -> Option<ProductDetail> {
		self.find(product_id).cloned().map(ProductDetail::from_product)
	}

	/// Items sharing the product's second-level or first-level category,
	/// in catalog order, excluding the product itself.
	pub fn related(&self, product: &Product, limit: usize) -> Vec<Product> {
		self.items
			.iter()
			.filter(|item| item.product_id != product.product_id)
			.filter(|item| {
				(!product.category2.is_empty() && item.category2 == product.category2)
					|| (!product.category1.is_empty() && item.category1 == product.category1)
			})
			.take(limit)
			.cloned()
			.collect()
	}
}
