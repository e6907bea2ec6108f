// src/handlers/companies.rs

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::rbac::RequireAdmin,
    models::company::Company,
};

// GET /api/companies
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "All B2B customers", body = Vec<Company>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.company_service.list().await?;
    Ok(Json(companies))
}

// GET /api/companies/{id}
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(
        ("id" = Uuid, Path, description = "Company id")
    ),
    responses(
        (status = 200, description = "Company details", body = Company),
        (status = 404, description = "Company not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.get(id).await?;
    Ok(Json(company))
}

// POST /api/companies/{id}/deactivate
#[utoipa::path(
    post,
    path = "/api/companies/{id}/deactivate",
    tag = "Companies",
    params(
        ("id" = Uuid, Path, description = "Company id")
    ),
    responses(
        (status = 200, description = "Company deactivated", body = Company)
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_company(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.set_active(id, false).await?;
    Ok(Json(company))
}

// POST /api/companies/{id}/reactivate
#[utoipa::path(
    post,
    path = "/api/companies/{id}/reactivate",
    tag = "Companies",
    params(
        ("id" = Uuid, Path, description = "Company id")
    ),
    responses(
        (status = 200, description = "Company reactivated", body = Company)
    ),
    security(("api_jwt" = []))
)]
pub async fn reactivate_company(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.set_active(id, true).await?;
    Ok(Json(company))
}
