use async_graphql::parser::{parse_query, types::OperationType};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::graphql::{build_schema, AnalyticsSchema};
use crate::handlers::products::service_error_to_response;
use crate::handlers::{health_check, metrics_handler, ServiceInfo};
use crate::models::AnalyticsSummary;
use crate::observability::Metrics;
use crate::services::AnalyticsService;

/// Shared state of the analytics service router
#[derive(Clone, FromRef)]
pub struct AnalyticsState {
    pub schema: AnalyticsSchema,
    pub analytics_service: Arc<AnalyticsService>,
    pub metrics: Arc<Metrics>,
    pub info: ServiceInfo,
}

impl AnalyticsState {
    pub fn new(
        analytics_service: Arc<AnalyticsService>,
        metrics: Arc<Metrics>,
        info: ServiceInfo,
    ) -> Self {
        Self {
            schema: build_schema(analytics_service.clone(), metrics.clone()),
            analytics_service,
            metrics,
            info,
        }
    }
}

/// Router for the GraphQL endpoint and its REST companions
pub fn create_analytics_router(state: AnalyticsState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/graphql", get(graphql_help).post(graphql_handler))
        .route("/api/analytics/summary", get(analytics_summary))
        .with_state(state)
}

#[instrument(name = "graphql", skip_all)]
pub async fn graphql_handler(
    State(state): State<AnalyticsState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner();
    let kind = operation_kind(&request);

    let response = state.schema.execute(request).await;

    if response.is_err() {
        crate::warn_with_trace!(
            errors = response.errors.len(),
            "GraphQL {} returned errors",
            kind
        );
    }
    state.metrics.record_graphql_operation(kind, response.is_ok());

    response.into()
}

/// Metric label for the operation the request selects. Documents that fail
/// to parse are counted as queries.
fn operation_kind(request: &async_graphql::Request) -> &'static str {
    let Ok(document) = parse_query(&request.query) else {
        return "query";
    };

    let mut operations = document.operations.iter();
    let selected = match request.operation_name.as_deref() {
        Some(name) => operations.find(|(op_name, _)| op_name.map(|n| n.as_str()) == Some(name)),
        None => operations.next(),
    };

    match selected.map(|(_, operation)| operation.node.ty) {
        Some(OperationType::Mutation) => "mutation",
        Some(OperationType::Subscription) => "subscription",
        _ => "query",
    }
}

/// Usage hints for clients that GET the GraphQL endpoint
pub async fn graphql_help() -> Json<Value> {
    Json(json!({
        "message": "GraphQL endpoint is available at POST /graphql",
        "example_queries": {
            "sales_reports": "query { salesReports { id period totalRevenue totalOrders } }",
            "top_products": "query { topProducts(limit: 5) { productId productName totalRevenue } }",
            "user_statistics": "query { userStatistics(userId: \"user1\") { username totalOrders totalSpent } }",
            "revenue_by_category": "query { revenueByCategory { category revenue percentage } }",
            "generate_report": "mutation { generateReport(reportType: \"sales\", startDate: \"2023-01-01\", endDate: \"2023-12-31\") { success reportId message } }"
        }
    }))
}

#[instrument(name = "analytics_summary", skip(state))]
pub async fn analytics_summary(
    State(state): State<AnalyticsState>,
) -> Result<Json<AnalyticsSummary>, (StatusCode, Json<Value>)> {
    state
        .analytics_service
        .summary()
        .await
        .map(Json)
        .map_err(service_error_to_response)
}
