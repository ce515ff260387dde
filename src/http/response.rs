//! Response handling and transformation.
//!
//! # Responsibilities
//! - Serialize a `ForwardResult` back to the client as JSON
//! - Tag responses with the backend that handled them
//!
//! # Design Decisions
//! - Backend body and status pass through unchanged
//! - Transport failures surface as 503 with an `error` field

use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::dispatch::ForwardResult;

/// Header naming the backend a request was routed to.
pub const X_GATEWAY_BACKEND: HeaderName = HeaderName::from_static("x-gateway-backend");

impl IntoResponse for ForwardResult {
    fn into_response(self) -> Response {
        let backend = HeaderValue::from_static(self.backend.as_str());
        (self.status, [(X_GATEWAY_BACKEND, backend)], Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};

    use crate::load_balancer::BackendId;

    #[tokio::test]
    async fn test_passthrough_response() {
        let result = ForwardResult::passthrough(
            BackendId::Blue,
            StatusCode::OK,
            json!({ "spaces": 2, "tabs": 1 }),
        );
        let response = result.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[&X_GATEWAY_BACKEND], "blue");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "spaces": 2, "tabs": 1 }));
    }
}
