use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::{error, info};

use crate::config::{Config, ServerConfig};
use crate::handlers::{
    create_analytics_router, create_product_router, request_validation_middleware,
    security_headers_middleware, AnalyticsState, ProductState, ServiceInfo,
};
use crate::models::ServiceResult;
use crate::observability::{observability_middleware, shutdown_observability, Metrics};
use crate::repositories::{sample_catalog, InMemoryProductRepository, StaticAnalyticsRepository};
use crate::services::{AnalyticsService, ProductService};

fn service_info(config: &Config) -> ServiceInfo {
    ServiceInfo::new(
        config.observability.service_name.clone(),
        config.observability.service_version.clone(),
    )
}

/// Build the product service application, seeding the catalog when enabled
pub async fn product_app(config: &Config, metrics: Arc<Metrics>) -> ServiceResult<Router> {
    let repository = Arc::new(InMemoryProductRepository::new());
    let product_service = Arc::new(ProductService::new(repository));

    if config.catalog.seed_catalog {
        product_service.seed_catalog(sample_catalog()).await?;
    }

    let router = create_product_router(ProductState::new(
        product_service,
        metrics.clone(),
        service_info(config),
    ));
    Ok(apply_middleware(router, &config.server, metrics))
}

/// Build the analytics service application over the sample dataset
pub fn analytics_app(config: &Config, metrics: Arc<Metrics>) -> Router {
    let repository = Arc::new(StaticAnalyticsRepository::with_sample_data());
    let analytics_service = Arc::new(AnalyticsService::new(repository));

    let router = create_analytics_router(AnalyticsState::new(
        analytics_service,
        metrics.clone(),
        service_info(config),
    ));
    apply_middleware(router, &config.server, metrics)
}

/// Layers shared by both services, listed inner to outer
pub fn apply_middleware(router: Router, server: &ServerConfig, metrics: Arc<Metrics>) -> Router {
    let max_request_size = server.max_request_size;

    router
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(move |req, next| {
            request_validation_middleware(max_request_size, req, next)
        }))
        .layer(DefaultBodyLimit::max(max_request_size))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics.clone(), req, next)
        }))
}

/// Bind the configured address and serve until ctrl-c
pub async fn serve(app: Router, server: &ServerConfig) -> std::io::Result<()> {
    let addr: SocketAddr = server
        .bind_address()
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
    shutdown_observability().await;
}
