use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::observability::Metrics;

/// Identity reported by the health endpoint
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Health check endpoint handler
#[instrument(name = "health_check", skip(info))]
pub async fn health_check(State(info): State<ServiceInfo>) -> Json<Value> {
    Json(json!({
        "service": info.name,
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": info.version,
    }))
}

/// Prometheus scrape endpoint
pub async fn metrics_handler(State(metrics): State<Arc<Metrics>>) -> Response {
    metrics.as_ref().into_response()
}
