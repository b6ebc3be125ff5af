use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRef, Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, instrument, warn};

use crate::handlers::{health_check, metrics_handler, ServiceInfo};
use crate::models::{
    CreateProductRequest, Product, ProductListQuery, RepositoryError, ServiceError,
    StockUpdateResponse, UpdateProductRequest,
};
use crate::observability::{Metrics, OperationTracer};
use crate::services::ProductService;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const INSUFFICIENT_STOCK: &str = "Insufficient stock";

type ApiError = (StatusCode, Json<Value>);

/// Shared state of the product service router
#[derive(Clone, FromRef)]
pub struct ProductState {
    pub product_service: Arc<ProductService>,
    pub tracer: OperationTracer,
    pub metrics: Arc<Metrics>,
    pub info: ServiceInfo,
}

impl ProductState {
    pub fn new(product_service: Arc<ProductService>, metrics: Arc<Metrics>, info: ServiceInfo) -> Self {
        Self {
            product_service,
            tracer: OperationTracer::new(metrics.clone()),
            metrics,
            info,
        }
    }
}

/// Query parameters of the stock adjustment endpoint
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub quantity: i64,
}

/// Router for the product catalog REST surface
pub fn create_product_router(state: ProductState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:product_id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/products/:product_id/stock", patch(adjust_stock))
        .route("/api/products/category/:category", get(list_by_category))
        .with_state(state)
}

#[instrument(name = "list_products", skip_all)]
pub async fn list_products(
    State(state): State<ProductState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query.map_err(|rejection| unprocessable(rejection.body_text()))?;
    let filters = query
        .into_filters()
        .map_err(|err| service_error_to_response(err.into()))?;

    state
        .tracer
        .trace_catalog_operation("list", state.product_service.list_products(filters))
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

#[instrument(name = "get_product", skip(state), fields(product_id = %product_id))]
pub async fn get_product(
    State(state): State<ProductState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .tracer
        .trace_catalog_operation("get", state.product_service.get_product(&product_id))
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

#[instrument(name = "create_product", skip_all)]
pub async fn create_product(
    State(state): State<ProductState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(request) = payload.map_err(|rejection| unprocessable(rejection.body_text()))?;

    let product = state
        .tracer
        .trace_catalog_operation("create", state.product_service.create_product(request))
        .await
        .map_err(service_error_to_response)?;

    crate::info_with_trace!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(name = "update_product", skip(state, payload), fields(product_id = %product_id))]
pub async fn update_product(
    State(state): State<ProductState>,
    Path(product_id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(request) = payload.map_err(|rejection| unprocessable(rejection.body_text()))?;

    state
        .tracer
        .trace_catalog_operation(
            "update",
            state.product_service.update_product(&product_id, request),
        )
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

#[instrument(name = "delete_product", skip(state), fields(product_id = %product_id))]
pub async fn delete_product(
    State(state): State<ProductState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .tracer
        .trace_catalog_operation("delete", state.product_service.delete_product(&product_id))
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(service_error_to_response)
}

#[instrument(name = "list_by_category", skip(state), fields(category = %category))]
pub async fn list_by_category(
    State(state): State<ProductState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    state
        .tracer
        .trace_catalog_operation(
            "list_by_category",
            state.product_service.list_by_category(&category),
        )
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

#[instrument(name = "adjust_stock", skip(state, query), fields(product_id = %product_id))]
pub async fn adjust_stock(
    State(state): State<ProductState>,
    Path(product_id): Path<String>,
    query: Result<Query<StockQuery>, QueryRejection>,
) -> Result<Json<StockUpdateResponse>, ApiError> {
    let Query(StockQuery { quantity }) =
        query.map_err(|rejection| unprocessable(rejection.body_text()))?;

    state
        .tracer
        .trace_catalog_operation(
            "adjust_stock",
            state.product_service.adjust_stock(&product_id, quantity),
        )
        .await
        .map(Json)
        .map_err(service_error_to_response)
}

fn error_body(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(json!({
            "detail": detail.into(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

fn unprocessable(detail: String) -> ApiError {
    warn!(detail = %detail, "Unreadable request");
    error_body(StatusCode::UNPROCESSABLE_ENTITY, detail)
}

/// Map a service error to its REST status and `{detail, timestamp}` body
pub fn service_error_to_response(err: ServiceError) -> ApiError {
    match err {
        ServiceError::ProductNotFound { .. }
        | ServiceError::Repository {
            source: RepositoryError::NotFound,
        } => error_body(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND),
        ServiceError::InsufficientStock { .. } => {
            error_body(StatusCode::BAD_REQUEST, INSUFFICIENT_STOCK)
        }
        ServiceError::ValidationError { .. }
        | ServiceError::MalformedParams { .. }
        | ServiceError::UnknownReportType { .. } => {
            error_body(StatusCode::BAD_REQUEST, err.to_string())
        }
        ServiceError::Repository { .. } => {
            error!(error = %err, "Store failure");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryProductRepository;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn app() -> Router {
        let service = ProductService::new(Arc::new(InMemoryProductRepository::new()));
        create_product_router(ProductState::new(
            Arc::new(service),
            Arc::new(Metrics::new().unwrap()),
            ServiceInfo::new("product-service", "1.0.0"),
        ))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_service_error_mapping() {
        let (status, Json(body)) = service_error_to_response(ServiceError::ProductNotFound {
            id: "x".to_string(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], PRODUCT_NOT_FOUND);

        let (status, Json(body)) = service_error_to_response(ServiceError::InsufficientStock {
            available: 1,
            adjustment: -2,
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], INSUFFICIENT_STOCK);

        let (status, _) = service_error_to_response(ServiceError::Repository {
            source: RepositoryError::ConstraintViolation {
                message: "duplicate".to_string(),
            },
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = app();

        let (status, created) = send(
            &app,
            json_request(
                "POST",
                "/api/products",
                json!({ "name": "Gaming Mouse", "price": 59.99, "stock": 3, "category": "Gaming" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["created_at"], created["updated_at"]);

        let uri = format!("/api/products/{}", created["id"].as_str().unwrap());
        let (status, fetched) = send(&app, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let (status, body) = send(
            &app(),
            json_request("POST", "/api/products", json!({ "name": "Free", "price": 0, "stock": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("price"));
    }

    #[tokio::test]
    async fn test_create_unreadable_body() {
        let (status, body) = send(
            &app(),
            json_request("POST", "/api/products", json!({ "name": "No price" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_missing_product_is_404() {
        let app = app();

        let (status, body) = send(&app, empty_request("GET", "/api/products/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], PRODUCT_NOT_FOUND);

        let (status, _) = send(&app, empty_request("DELETE", "/api/products/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_negative_pagination_is_rejected() {
        let (status, _) = send(&app(), empty_request("GET", "/api/products?limit=-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app(), empty_request("GET", "/api/products?skip=abc")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_stock_adjustment_requires_quantity() {
        let (status, _) = send(&app(), empty_request("PATCH", "/api/products/x/stock")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_category_route_is_not_an_id() {
        let (status, body) = send(&app(), empty_request("GET", "/api/products/category/Gaming")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
