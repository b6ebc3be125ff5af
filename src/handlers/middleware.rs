use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use serde_json::{json, Value};
use tracing::warn;

type Rejection = (StatusCode, Json<Value>);

/// Reject bodies that are not JSON or that announce a size above `max_request_size`
pub async fn request_validation_middleware(
    max_request_size: usize,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Rejection> {
    validate_request_size(&request, max_request_size)?;
    validate_content_type(&request)?;

    Ok(next.run(request).await)
}

fn carries_body(request: &Request<Body>) -> bool {
    let headers = request.headers();

    headers.contains_key(header::TRANSFER_ENCODING)
        || content_length(request).is_some_and(|length| length > 0)
        || headers.contains_key(header::CONTENT_TYPE)
}

fn content_length(request: &Request<Body>) -> Option<u64> {
    request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}

// Body-less writes such as the stock adjustment are let through.
fn validate_content_type(request: &Request<Body>) -> Result<(), Rejection> {
    let method = request.method();
    let writes = method == "POST" || method == "PUT" || method == "PATCH";

    if !writes || !carries_body(request) {
        return Ok(());
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        Ok(())
    } else {
        warn!(content_type = %content_type, "Rejected request with non-JSON body");
        Err(rejection(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Content-Type must be application/json",
        ))
    }
}

fn validate_request_size(request: &Request<Body>, max_request_size: usize) -> Result<(), Rejection> {
    match content_length(request) {
        Some(length) if length > max_request_size as u64 => {
            warn!(length, max_request_size, "Request too large");
            Err(rejection(
                StatusCode::PAYLOAD_TOO_LARGE,
                &format!(
                    "Request size {} bytes exceeds maximum of {} bytes",
                    length, max_request_size
                ),
            ))
        }
        _ => Ok(()),
    }
}

fn rejection(status: StatusCode, detail: &str) -> Rejection {
    (
        status,
        Json(json!({
            "detail": detail,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Security headers middleware
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
