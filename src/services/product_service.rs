use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    CreateProductRequest, Product, ProductFilters, ServiceError, ServiceResult,
    StockUpdateResponse, UpdateProductRequest, Validate,
};
use crate::repositories::ProductRepository;

pub const STOCK_UPDATED_MESSAGE: &str = "Stock updated successfully";

/// Service for managing the product catalog
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// List products, filtered by category and windowed by skip/limit
    #[instrument(skip(self), fields(filters = ?filters))]
    pub async fn list_products(&self, filters: ProductFilters) -> ServiceResult<Vec<Product>> {
        crate::info_with_trace!("Listing products");

        let products = self.repository.find_all(filters).await?;

        crate::info_with_trace!("Found {} products matching criteria", products.len());
        Ok(products)
    }

    /// Get a specific product by ID
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        match self.repository.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                crate::warn_with_trace!("Product not found");
                Err(ServiceError::ProductNotFound { id: id.to_string() })
            }
        }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        crate::info_with_trace!("Creating new product");

        request.validate()?;

        let created = self.repository.create(Product::new(request)).await?;

        crate::info_with_trace!("Product created successfully with ID: {}", created.id);
        Ok(created)
    }

    /// Apply a partial update to an existing product.
    ///
    /// The read and the write take the store lock separately; a concurrent
    /// writer to the same id can be overwritten.
    #[instrument(skip(self, request), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> ServiceResult<Product> {
        crate::info_with_trace!("Updating product");

        let mut product = self.get_product(id).await?;

        request.validate()?;
        product.apply_update(request);

        let updated = self.repository.update(product).await?;

        crate::info_with_trace!("Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &str) -> ServiceResult<()> {
        crate::info_with_trace!("Deleting product");

        if !self.repository.exists(id).await? {
            crate::warn_with_trace!("Product not found");
            return Err(ServiceError::ProductNotFound { id: id.to_string() });
        }

        self.repository.delete(id).await?;

        crate::info_with_trace!("Product deleted successfully");
        Ok(())
    }

    /// Every product in a category, without pagination
    #[instrument(skip(self), fields(category = %category))]
    pub async fn list_by_category(&self, category: &str) -> ServiceResult<Vec<Product>> {
        let products = self.repository.find_by_category(category).await?;

        crate::info_with_trace!("Found {} products in category {}", products.len(), category);
        Ok(products)
    }

    /// Add a signed delta to the stock of a product.
    ///
    /// A delta that would take stock below zero is rejected and the stored
    /// record is left untouched.
    #[instrument(skip(self), fields(id = %id, quantity = quantity))]
    pub async fn adjust_stock(&self, id: &str, quantity: i64) -> ServiceResult<StockUpdateResponse> {
        crate::info_with_trace!("Adjusting product stock");

        let mut product = self.get_product(id).await?;

        let new_stock = match product.stock.checked_add(quantity) {
            Some(new_stock) if new_stock >= 0 => new_stock,
            Some(_) => {
                crate::warn_with_trace!(
                    available = product.stock,
                    "Rejected stock adjustment below zero"
                );
                return Err(ServiceError::InsufficientStock {
                    available: product.stock,
                    adjustment: quantity,
                });
            }
            None => {
                return Err(ServiceError::ValidationError {
                    message: format!("Stock adjustment {} overflows", quantity),
                });
            }
        };

        product.stock = new_stock;
        product.touch();
        let updated = self.repository.update(product).await?;

        crate::info_with_trace!("Stock updated to {}", updated.stock);
        Ok(StockUpdateResponse {
            message: STOCK_UPDATED_MESSAGE.to_string(),
            new_stock: updated.stock,
        })
    }

    /// Load a starter catalog through the regular create path
    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn seed_catalog(&self, requests: Vec<CreateProductRequest>) -> ServiceResult<usize> {
        let mut seeded = 0;
        for request in requests {
            self.create_product(request).await?;
            seeded += 1;
        }

        crate::info_with_trace!("Seeded catalog with {} products", seeded);
        Ok(seeded)
    }
}
