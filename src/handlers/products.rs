// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, rbac::RequireAdmin},
    models::auth::UserRole,
    models::product::{
        Fpakk, Mellompakk, Product, ProductDraft, ProductStatus, ProductStructure, Toppakk,
    },
};

// ---
// Custom validation
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: Product create / update
// ---
// `structure` stays optional here: the packaging validator reports a missing
// structure as a form error together with everything else that is wrong.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "Product name is required."))]
    #[schema(example = "Highland Single Malt")]
    pub name: String,

    #[validate(length(min = 1, message = "SKU is required."))]
    #[schema(example = "BON-WHI-001")]
    pub sku: String,

    #[validate(length(min = 1, message = "Category is required."))]
    #[schema(example = "Whiskey")]
    pub category: String,

    #[serde(default)]
    pub description: String,

    pub country: Option<String>,
    pub manufacturer: Option<String>,
    pub ean_number: Option<String>,
    pub alcohol_percentage: Option<Decimal>,

    pub structure: Option<ProductStructure>,
    pub fpakk: Option<Fpakk>,
    pub mellompakk: Option<Mellompakk>,
    pub toppakk: Option<Toppakk>,

    #[validate(custom(function = validate_not_negative))]
    #[serde(default)]
    pub base_price: Decimal,

    pub status: ProductStatus,

    // Low-stock alert thresholds per tier (0 = no alert). Only used on create.
    #[serde(default)]
    pub fpakk_threshold: i64,
    #[serde(default)]
    pub mellompakk_threshold: i64,
    #[serde(default)]
    pub toppakk_threshold: i64,
}

impl ProductPayload {
    fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            sku: self.sku,
            category: self.category,
            description: self.description,
            country: self.country,
            manufacturer: self.manufacturer,
            ean_number: self.ean_number,
            alcohol_percentage: self.alcohol_percentage,
            structure: self.structure,
            fpakk: self.fpakk,
            mellompakk: self.mellompakk,
            toppakk: self.toppakk,
            base_price: self.base_price,
            status: self.status,
        }
    }
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catalog",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid packaging configuration"),
        (status = 409, description = "SKU already in use")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let fpakk_threshold = payload.fpakk_threshold;
    let mellompakk_threshold = payload.mellompakk_threshold;
    let toppakk_threshold = payload.toppakk_threshold;

    let product = app_state
        .catalog_service
        .create_product(
            payload.into_draft(),
            fpakk_threshold,
            mellompakk_threshold,
            toppakk_threshold,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catalog",
    request_body = ProductPayload,
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid packaging configuration"),
        (status = 404, description = "Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .update_product(id, payload.into_draft())
        .await?;

    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub status: Option<ProductStatus>,
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(
        ("status" = Option<ProductStatus>, Query, description = "Status filter (admins only)")
    ),
    responses(
        (status = 200, description = "Product catalog", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Admins browse the whole catalog (optionally filtered); customers only
    // ever see what is actually for sale.
    let products = if user.role == UserRole::Admin {
        app_state.catalog_service.list_products(query.status).await?
    } else {
        app_state.catalog_service.list_storefront().await?
    };

    Ok(Json(products))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(id).await?;

    // Hide unpublished products from customers
    if user.role != UserRole::Admin && product.status != ProductStatus::Active {
        return Err(AppError::ProductNotFound);
    }

    Ok(Json(product))
}
