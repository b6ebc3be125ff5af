// Repositories module - data access layer

pub mod analytics_repository;
pub mod product_repository;
pub mod seed;

#[cfg(test)]
mod tests;

pub use analytics_repository::{AnalyticsRepository, StaticAnalyticsRepository};
pub use product_repository::{InMemoryProductRepository, ProductRepository};
pub use seed::sample_catalog;
