use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::{non_empty, ValidationError, ValidationResult};

/// Catalog product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: Option<String>,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    pub stock: i64,
}

/// Partial update of a product.
///
/// `None` means the key was absent from the request and the stored value is
/// kept. The nullable fields carry a second `Option` so that an explicit
/// `null` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

/// Filters and pagination window for product listings
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            category: None,
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Query parameters of the product listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

impl ProductListQuery {
    /// Convert to repository filters, rejecting negative window bounds.
    /// An empty category means no filter.
    pub fn into_filters(self) -> ValidationResult<ProductFilters> {
        Ok(ProductFilters {
            category: non_empty(self.category.as_deref()).map(str::to_string),
            skip: window_bound("skip", self.skip, 0)?,
            limit: window_bound("limit", self.limit, DEFAULT_PAGE_LIMIT)?,
        })
    }
}

fn window_bound(field: &str, value: Option<i64>, default: usize) -> ValidationResult<usize> {
    match value {
        None => Ok(default),
        Some(value) => usize::try_from(value).map_err(|_| ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            value: value.to_string(),
        }),
    }
}

/// Response for a stock adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUpdateResponse {
    pub message: String,
    pub new_stock: i64,
}

impl Product {
    /// Create a new product with a generated id; both timestamps share one instant
    pub fn new(request: CreateProductRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            price: request.price,
            category: request.category,
            stock: request.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `request`, then refresh `updated_at`
    pub fn apply_update(&mut self, request: UpdateProductRequest) {
        if let Some(name) = request.name {
            self.name = name;
        }
        if let Some(description) = request.description {
            self.description = description;
        }
        if let Some(price) = request.price {
            self.price = price;
        }
        if let Some(category) = request.category {
            self.category = category;
        }
        if let Some(stock) = request.stock {
            self.stock = stock;
        }
        self.touch();
    }

    /// Refresh `updated_at`, always moving it forward.
    pub fn touch(&mut self) {
        let now = Utc::now();
        // Two clock reads can be equal at this resolution.
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Check if the product matches the category filter of `filters`
    pub fn matches_filters(&self, filters: &ProductFilters) -> bool {
        match &filters.category {
            Some(category) => self.in_category(category),
            None => true,
        }
    }
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
