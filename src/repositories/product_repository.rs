use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::models::{Product, ProductFilters, RepositoryError, RepositoryResult};

/// Trait defining the interface for product data access operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find products matching the filters, windowed by `skip`/`limit`
    async fn find_all(&self, filters: ProductFilters) -> RepositoryResult<Vec<Product>>;

    /// Find a product by its ID
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;

    /// Find every product in a category
    async fn find_by_category(&self, category: &str) -> RepositoryResult<Vec<Product>>;

    /// Store a new product
    async fn create(&self, product: Product) -> RepositoryResult<Product>;

    /// Replace an existing product
    async fn update(&self, product: Product) -> RepositoryResult<Product>;

    /// Remove a product
    async fn delete(&self, id: &str) -> RepositoryResult<()>;

    /// Check if a product exists
    async fn exists(&self, id: &str) -> RepositoryResult<bool>;
}

/// Process-local product store.
///
/// Records iterate in insertion order. Every call takes the lock once, so a
/// read-modify-write done by a caller across two calls is not atomic and the
/// last `update` wins.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<IndexMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self), fields(store = "memory"))]
    async fn find_all(&self, filters: ProductFilters) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;

        let page: Vec<Product> = products
            .values()
            .filter(|product| product.matches_filters(&filters))
            .skip(filters.skip)
            .take(filters.limit)
            .cloned()
            .collect();

        debug!(returned = page.len(), total = products.len(), "Scanned product store");
        Ok(page)
    }

    #[instrument(skip(self), fields(store = "memory", id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    #[instrument(skip(self), fields(store = "memory", category = %category))]
    async fn find_by_category(&self, category: &str) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|product| product.in_category(category))
            .cloned()
            .collect())
    }

    #[instrument(skip(self, product), fields(store = "memory", id = %product.id))]
    async fn create(&self, product: Product) -> RepositoryResult<Product> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.id) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Product {} already exists", product.id),
            });
        }

        products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    #[instrument(skip(self, product), fields(store = "memory", id = %product.id))]
    async fn update(&self, product: Product) -> RepositoryResult<Product> {
        let mut products = self.products.write().await;

        match products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    #[instrument(skip(self), fields(store = "memory", id = %id))]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        // shift_remove keeps the remaining records in insertion order
        match self.products.write().await.shift_remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn exists(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self.products.read().await.contains_key(id))
    }
}
