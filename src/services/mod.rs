// Services module - business logic layer

pub mod analytics_service;
pub mod product_service;

pub use analytics_service::AnalyticsService;
pub use product_service::ProductService;
