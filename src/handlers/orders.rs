// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
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
    middleware::{auth::AuthenticatedUser, rbac::RequireAdmin},
    models::order::{Order, OrderStatus},
    services::order_service::OrderLine,
};

// ---
// Payload: Place order
// ---
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    #[schema(example = 12)]
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderPayload {
    #[validate(length(min = 1, message = "An order needs at least one line."), nested)]
    pub items: Vec<OrderLinePayload>,
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = PlaceOrderPayload,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 403, description = "Account is not an active customer"),
        (status = 409, description = "Insufficient stock")
    ),
    security(("api_jwt" = []))
)]
pub async fn place_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lines = payload
        .items
        .into_iter()
        .map(|line| OrderLine {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    let order = app_state.order_service.place_order(&user, lines).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders/mine
#[utoipa::path(
    get,
    path = "/api/orders/mine",
    tag = "Orders",
    responses(
        (status = 200, description = "The customer's own orders", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_my_orders(&user).await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(
        ("status" = Option<OrderStatus>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "All orders", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders(query.status).await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "processing")]
    pub status: OrderStatus,
}

// POST /api/orders/{id}/status
#[utoipa::path(
    post,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateOrderStatusPayload,
    params(
        ("id" = Uuid, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 409, description = "Transition not allowed")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_status(id, payload.status)
        .await?;
    Ok(Json(order))
}

// POST /api/orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order cancelled, stock restored", body = Order),
        (status = 409, description = "Order already shipped")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.cancel_order(&user, id).await?;
    Ok(Json(order))
}

// GET /api/orders/{id}/document
#[utoipa::path(
    get,
    path = "/api/orders/{id}/document",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order confirmation PDF", content_type = "application/pdf")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order_document(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // Ownership / admin scoping happens here; the document service only
    // renders.
    let order = app_state.order_service.get_order(&user, id).await?;
    let pdf = app_state.document_service.generate_order_pdf(order.id).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"order-{}.pdf\"", order.order_number),
            ),
        ],
        pdf,
    ))
}
