// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

/// The admin gate. Handlers that take this extractor only run for admin
/// accounts; everyone else gets a 403 before the handler body starts.
/// Runs behind `auth_guard`, which puts the user into the extensions.
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if user.role != UserRole::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}
