use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Whether 500 responses carry the internal error detail. Set once at startup.
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Validation(_) => "validation_error",
            ApiError::Internal(_) => "internal_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    /// Builds the response, optionally keeping internal error detail.
    pub fn into_response_with(self, expose_internal: bool) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                if expose_internal {
                    detail
                } else {
                    "An internal error occurred".to_string()
                }
            }
            ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Validation(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        };

        let body = ErrorEnvelope {
            error: ErrorBody { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23503") => ApiError::NotFound("Referenced resource not found".into()),
                _ => ApiError::Internal(format!("Database error: {}", db_err)),
            },
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    /// Joins every field message, ordered by field name.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        ApiError::Validation(message)
    }
}

impl From<validator::ValidationError> for ApiError {
    fn from(error: validator::ValidationError) -> Self {
        ApiError::Validation(
            error
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid input: {}", error.code)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::Unauthorized("x".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ServiceUnavailable("x".into()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let json = body_json(ApiError::NotFound("Team not found".into()).into_response()).await;
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "Team not found");
    }

    #[tokio::test]
    async fn test_internal_detail_hidden_by_default() {
        let response = ApiError::Internal("connection reset".into()).into_response_with(false);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_internal_detail_exposed_when_enabled() {
        let response = ApiError::Internal("connection reset".into()).into_response_with(true);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "connection reset");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::Unauthorized("test".to_string())),
            "Unauthorized: test"
        );
        assert_eq!(
            format!("{}", ApiError::Validation("test".to_string())),
            "Validation error: test"
        );
        assert_eq!(
            format!("{}", ApiError::Internal("test".to_string())),
            "Internal error: test"
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_sqlx_pool_timeout_is_internal() {
        let error: ApiError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, ApiError::Internal(_)));
    }

    #[test]
    fn test_from_single_validation_error() {
        let error: ApiError = shared::validation::parse_iso_date("yesterday")
            .unwrap_err()
            .into();
        match error {
            ApiError::Validation(msg) => assert!(msg.contains("YYYY-MM-DD")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_from_validation_errors_joins_fields() {
        use validator::Validate;
        let request = domain::models::CreateCommentRequest {
            author: String::new(),
            text: String::new(),
        };
        let error: ApiError = request.validate().unwrap_err().into();
        match error {
            ApiError::Validation(msg) => assert_eq!(
                msg,
                "Author must be between 1 and 100 characters; \
                 Comment must be between 1 and 2000 characters"
            ),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::Validate;
        let request = domain::models::CreateCommentRequest {
            author: "Supervisor".to_string(),
            text: String::new(),
        };
        let error: ApiError = request.validate().unwrap_err().into();
        match error {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "Comment must be between 1 and 2000 characters")
            }
            _ => panic!("Expected Validation error"),
        }
    }
}
