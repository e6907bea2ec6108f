use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Our error type, with `thiserror` for better ergonomics.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Product configuration is invalid")]
    ProductConfiguration(Vec<String>),

    #[error("E-mail already exists")]
    EmailAlreadyExists,

    #[error("SKU already exists")]
    SkuAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Admin access required")]
    Forbidden,

    #[error("Account is not active")]
    AccountNotActive,

    #[error("User not found")]
    UserNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("Company not found")]
    CompanyNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Application was already reviewed")]
    ApplicationAlreadyReviewed,

    #[error("A rejection reason is required")]
    RejectionReasonRequired,

    #[error("Invalid order status transition")]
    InvalidStatusTransition,

    #[error("Product '{0}' is not available for ordering")]
    ProductNotAvailable(String),

    #[error("Insufficient stock for '{0}'")]
    InsufficientStock(String),

    #[error("An admin account already exists")]
    AdminAlreadyExists,

    #[error("Font not found: {0}")]
    FontNotFound(String),

    // Database errors (sqlx)
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    // Generic variant for any other unexpected error.
    // `anyhow::Error` keeps the original context around.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Return every validation detail, not just the first one.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            // Same idea for the packaging configuration checks: the whole list
            // of violations goes back to the form at once.
            AppError::ProductConfiguration(errors) => {
                let body = Json(json!({
                    "error": "Product configuration is invalid.",
                    "details": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "This e-mail is already registered."),
            AppError::SkuAlreadyExists => (StatusCode::CONFLICT, "This SKU is already in use."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid e-mail or password."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Missing or invalid authentication token."),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "You need admin access to perform this action."),
            AppError::AccountNotActive => (StatusCode::FORBIDDEN, "Your account is not active. Wait for admin approval."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found."),
            AppError::ApplicationNotFound => (StatusCode::NOT_FOUND, "Application not found."),
            AppError::CompanyNotFound => (StatusCode::NOT_FOUND, "Company not found."),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Product not found."),
            AppError::OrderNotFound => (StatusCode::NOT_FOUND, "Order not found."),
            AppError::ApplicationAlreadyReviewed => (StatusCode::CONFLICT, "This application has already been reviewed."),
            AppError::RejectionReasonRequired => (StatusCode::BAD_REQUEST, "Rejection reason is required."),
            AppError::InvalidStatusTransition => (StatusCode::CONFLICT, "This status transition is not allowed."),
            AppError::ProductNotAvailable(ref name) => {
                let body = Json(json!({ "error": format!("Product '{}' is not available for ordering.", name) }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::InsufficientStock(ref name) => {
                let body = Json(json!({ "error": format!("Insufficient stock for '{}'.", name) }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::AdminAlreadyExists => (StatusCode::CONFLICT, "An admin account already exists."),

            // Everything else (DatabaseError, InternalServerError, ...) becomes a 500.
            // `tracing` logs the detailed message that `thiserror` gives us.
            ref e => {
                tracing::error!("Internal server error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        // Default response for simple errors that only carry a message.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
