//! Error-to-response mapping for the HTTP boundary.
//!
//! Every failure leaves the API as `{"error": <code>, "message": <text>}`.
//! Domain errors carry their own user-facing message; infrastructure faults
//! are logged and replaced with an opaque one.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use shopcart_core::{DomainError, ErrorKind};
use shopcart_infra::ServiceError;

pub const SERVER_ERROR_MESSAGE: &str = "서버가 응답할 수 없습니다.";
pub const FIELD_ERROR_DELIMITER: &str = ", ";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request-body field checks failed; one message per field.
    #[error("{}", .0.join(FIELD_ERROR_DELIMITER))]
    FieldValidation(Vec<String>),

    /// The body could not be parsed at all.
    #[error("{0}")]
    MalformedBody(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => ApiError::Domain(e),
            ServiceError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::FieldValidation(messages) => json_error(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                messages.join(FIELD_ERROR_DELIMITER),
            ),
            ApiError::MalformedBody(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_request", msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    SERVER_ERROR_MESSAGE,
                )
            }
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    let (status, code) = match err.kind() {
        ErrorKind::ProductNotFound => (StatusCode::NOT_FOUND, "product_not_found"),
        ErrorKind::Cart => (StatusCode::BAD_REQUEST, "cart_error"),
        ErrorKind::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        ErrorKind::InvalidId => (StatusCode::BAD_REQUEST, "invalid_id"),
    };
    json_error(status, code, err.to_string())
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Response for a handler that panicked.
pub fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal("handler panicked".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcart_core::ValidationKind;
    use shopcart_infra::store::StoreError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn product_not_found_is_404_with_its_message() {
        let response = ApiError::from(DomainError::product_not_found()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "product_not_found");
        assert_eq!(body["message"], "상품을 찾을 수 없습니다.");
    }

    #[tokio::test]
    async fn domain_failures_other_than_not_found_are_400() {
        let errors = [
            DomainError::cart("회원을 찾을 수 없습니다."),
            DomainError::validation(ValidationKind::NegativePrice, "상품 가격은 0원 이상이여야 합니다."),
            DomainError::invalid_id("invalid id"),
        ];
        for err in errors {
            let message = err.to_string();
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["message"], message);
        }
    }

    #[tokio::test]
    async fn store_failures_are_opaque_500s() {
        let err = ServiceError::from(StoreError::backend("cart.delete", "connection reset"));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], SERVER_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn field_errors_are_joined_into_one_message() {
        let response = ApiError::FieldValidation(vec![
            "상품명은 필수입니다.".to_string(),
            "상품 가격은 필수입니다.".to_string(),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "상품명은 필수입니다., 상품 가격은 필수입니다.");
    }

    #[tokio::test]
    async fn panics_become_opaque_500s() {
        let response = panic_response(Box::new("handler blew up"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], SERVER_ERROR_MESSAGE);
    }
}
