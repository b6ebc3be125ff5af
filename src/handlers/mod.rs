pub mod analytics;
pub mod health;
pub mod middleware;
pub mod products;

pub use analytics::{create_analytics_router, AnalyticsState};
pub use health::{health_check, metrics_handler, ServiceInfo};
pub use middleware::{request_validation_middleware, security_headers_middleware};
pub use products::{create_product_router, ProductState};
