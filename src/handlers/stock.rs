// src/handlers/stock.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::inventory::{InventoryView, PackagingLevel},
};

// ---
// Payload: Stock reception ("Varemottak")
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockReceptionPayload {
    pub product_id: Uuid,

    #[schema(example = "mellompakk")]
    pub level: PackagingLevel,

    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    #[schema(example = 100)]
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockReceptionResponse {
    pub inventory: InventoryView,
    // Human summary of what was received, e.g. "3 kasser (72 stk)"
    #[schema(example = "3 kasser (72 stk)")]
    pub received: String,
}

// POST /api/inventory/receptions
#[utoipa::path(
    post,
    path = "/api/inventory/receptions",
    tag = "Inventory",
    request_body = StockReceptionPayload,
    responses(
        (status = 201, description = "Stock registered", body = StockReceptionResponse),
        (status = 404, description = "Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn receive_stock(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<StockReceptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (inventory, received) = app_state
        .inventory_service
        .receive_stock(payload.product_id, payload.level, payload.quantity)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StockReceptionResponse {
            inventory,
            received,
        }),
    ))
}

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Stock levels for every product", body = Vec<InventoryView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_inventory(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, AppError> {
    let views = app_state.inventory_service.list_views().await?;
    Ok(Json(views))
}

// GET /api/inventory/{product_id}
#[utoipa::path(
    get,
    path = "/api/inventory/{product_id}",
    tag = "Inventory",
    params(
        ("product_id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Stock level for one product", body = InventoryView),
        (status = 404, description = "Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_inventory(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state.inventory_service.get_view(product_id).await?;
    Ok(Json(view))
}
