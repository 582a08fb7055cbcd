//! Error handling - every failure leaves as an `{error, message}` JSON body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_shared::ErrorResponse;

const NOT_FOUND_TITLE: &str = "Blog post not found";
const NOT_FOUND_MESSAGE: &str = "The requested blog post does not exist";
const STORAGE_MESSAGE: &str = "Database error";

/// The blog post operation a failure came from; decides the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogOperation {
    Create,
    Fetch,
    List,
    Update,
    Delete,
}

impl BlogOperation {
    fn failure_title(self) -> &'static str {
        match self {
            BlogOperation::Create => "Failed to create blog post",
            BlogOperation::Fetch => "Failed to retrieve blog post",
            BlogOperation::List => "Failed to retrieve blog posts",
            BlogOperation::Update => "Failed to update blog post",
            BlogOperation::Delete => "Failed to delete blog post",
        }
    }

    /// Create and update report every non-validation failure as 400.
    fn failures_are_client_errors(self) -> bool {
        matches!(self, BlogOperation::Create | BlogOperation::Update)
    }
}

/// Application-level error type that converts to JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {}", .0.message)]
    BadRequest(ErrorResponse),

    #[error("Not found: {}", .0.message)]
    NotFound(ErrorResponse),

    #[error("Internal error: {}", .0.message)]
    Internal(ErrorResponse),
}

impl AppError {
    /// Malformed or non-JSON request payload.
    pub fn invalid_body(detail: impl Into<String>) -> Self {
        AppError::BadRequest(ErrorResponse::invalid_body(detail))
    }

    /// No route matched the request.
    pub fn route_not_found() -> Self {
        AppError::NotFound(ErrorResponse::route_not_found())
    }

    /// Map a service failure according to the operation that produced it.
    pub fn from_domain(op: BlogOperation, err: DomainError) -> Self {
        let title = op.failure_title();

        match err {
            DomainError::Validation(reason) => AppError::BadRequest(ErrorResponse::new(title, reason)),
            DomainError::NotFound { .. } if op != BlogOperation::Create => {
                AppError::NotFound(ErrorResponse::new(NOT_FOUND_TITLE, NOT_FOUND_MESSAGE))
            }
            DomainError::NotFound { .. } => {
                AppError::BadRequest(ErrorResponse::new(title, NOT_FOUND_MESSAGE))
            }
            DomainError::Storage(e) => {
                tracing::error!(operation = ?op, "Database error: {}", e);
                let body = ErrorResponse::new(title, STORAGE_MESSAGE);
                if op.failures_are_client_errors() {
                    AppError::BadRequest(body)
                } else {
                    AppError::Internal(body)
                }
            }
        }
    }

    fn body(&self) -> &ErrorResponse {
        match self {
            AppError::BadRequest(body) | AppError::NotFound(body) | AppError::Internal(body) => body,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
