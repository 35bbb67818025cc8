// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

/// One failed input check, reported in the original express-validator shape.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), param: param.into() }
    }
}

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(Vec<FieldError>),
    DuplicateUser,
    InvalidCredentials,
    AlreadyLiked,
    NotLiked,

    // 401 Unauthorized
    Unauthorized(String),
    InvalidToken,
    // Ownership violation. The API reports this as 401, not the
    // semantically cleaner 403.
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateUser
            | ApiError::InvalidCredentials
            | ApiError::AlreadyLiked
            | ApiError::NotLiked => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::InvalidToken | ApiError::Forbidden(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation(fields) => fields
                .iter()
                .map(|f| f.msg.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            ApiError::DuplicateUser => "User already exists".to_string(),
            ApiError::InvalidCredentials => "Invalid Credentials".to_string(),
            ApiError::AlreadyLiked => "Post already liked".to_string(),
            ApiError::NotLiked => "Post has not yet been liked".to_string(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::InvalidToken => "Token is not valid".to_string(),
            ApiError::Forbidden(msg) => msg.clone(),
            ApiError::NotFound(msg) => msg.clone(),
            // Never leak internal detail to the client.
            ApiError::Internal(_) => "Server Error".to_string(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            // Validation failures keep the `errors` array shape so clients
            // can surface every violated field at once.
            ApiError::Validation(fields) => json!({ "errors": fields }),
            ApiError::DuplicateUser => {
                json!({ "errors": [{ "msg": self.message() }] })
            }
            ApiError::InvalidCredentials => {
                json!({ "errors": [{ "msg": self.message() }] })
            }
            _ => json!({ "msg": self.message() }),
        }
    }
}

// Static constructor methods for the parameterized variants
impl ApiError {
    pub fn validation(fields: Vec<FieldError>) -> Self {
        ApiError::Validation(fields)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert storage failures to a generic 500. The carried detail is
// logged once at the response boundary; clients only ever see
// "Server Error".
impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        ApiError::internal(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Every 500 gets its real cause logged here, exactly once, no
        // matter which handler built it.
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal error: {}", detail);
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
