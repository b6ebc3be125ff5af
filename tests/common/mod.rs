use std::sync::Arc;

use axum::Router;
use commerce_rs::{
    config::{CatalogConfig, ObservabilityConfig, ServerConfig},
    server, Config, Metrics, ServiceKind,
};
use reqwest::Client;
use tokio::net::TcpListener;

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
}

pub fn test_config(kind: ServiceKind, seed_catalog: bool) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: kind.default_port(),
            request_timeout_seconds: 5,
            max_request_size: 64 * 1024,
        },
        observability: ObservabilityConfig {
            service_name: kind.service_name().to_string(),
            service_version: "1.0.0".to_string(),
            otlp_endpoint: None,
            log_level: "info".to_string(),
            enable_json_logging: false,
        },
        catalog: CatalogConfig { seed_catalog },
    }
}

impl TestEnvironment {
    /// Product service over an empty catalog
    pub async fn product() -> Self {
        Self::product_with_seed(false).await
    }

    pub async fn product_with_seed(seed_catalog: bool) -> Self {
        let config = test_config(ServiceKind::Product, seed_catalog);
        let app = server::product_app(&config, Arc::new(Metrics::new().unwrap()))
            .await
            .expect("Failed to build product app");

        Self::spawn(app).await
    }

    pub async fn analytics() -> Self {
        let config = test_config(ServiceKind::Analytics, false);
        let app = server::analytics_app(&config, Arc::new(Metrics::new().unwrap()));

        Self::spawn(app).await
    }

    async fn spawn(app: Router) -> Self {
        // The listener is bound before returning, so requests queue until serve starts
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
