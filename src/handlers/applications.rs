// src/handlers/applications.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::application::{ApplicationStatus, CompanyApplication},
};

#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
}

// GET /api/applications?status=pending
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "Applications",
    params(
        ("status" = Option<ApplicationStatus>, Query, description = "Filter by review status")
    ),
    responses(
        (status = 200, description = "Company applications", body = Vec<CompanyApplication>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_applications(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let applications = app_state.application_service.list(query.status).await?;
    Ok(Json(applications))
}

// GET /api/applications/{id}
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "Applications",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application details", body = CompanyApplication),
        (status = 404, description = "Application not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_application(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let application = app_state.application_service.get(id).await?;
    Ok(Json(application))
}

// POST /api/applications/{id}/approve
#[utoipa::path(
    post,
    path = "/api/applications/{id}/approve",
    tag = "Applications",
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application approved; company and customer account provisioned", body = CompanyApplication),
        (status = 409, description = "Application already reviewed")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_application(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let application = app_state
        .application_service
        .approve_application(id, admin.id)
        .await?;

    Ok(Json(application))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectApplicationPayload {
    #[validate(length(min = 1, message = "Rejection reason is required."))]
    #[schema(example = "Incomplete documentation")]
    pub reason: String,
}

// POST /api/applications/{id}/reject
#[utoipa::path(
    post,
    path = "/api/applications/{id}/reject",
    tag = "Applications",
    request_body = RejectApplicationPayload,
    params(
        ("id" = Uuid, Path, description = "Application id")
    ),
    responses(
        (status = 200, description = "Application rejected", body = CompanyApplication),
        (status = 409, description = "Application already reviewed")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_application(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectApplicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let application = app_state
        .application_service
        .reject_application(id, admin.id, &payload.reason)
        .await?;

    Ok(Json(application))
}
