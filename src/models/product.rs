// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// --- ENUMS ---

// `simple` products are sold loose (Fpakk only). `hierarchical` products
// carry the full Fpakk -> Mellompakk -> Toppakk packaging chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_structure", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStructure {
    Simple,
    Hierarchical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
}

// A pack either repeats one base unit or mixes several (with a content list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PackType {
    Homogeneous,
    Mixed,
}

// --- PACKAGING RECORDS (stored as JSONB on the product row) ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length_mm: i32,
    pub width_mm: i32,
    pub height_mm: i32,
}

// One line of a mixed pack: which subordinate unit, and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackContentLine {
    pub reference_id: String,
    pub quantity: u32,
}

// Fpakk: the base sellable unit (e.g. one bottle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fpakk {
    pub name: String,
    #[schema(example = "0.5L")]
    pub size: String,
    pub variant: Option<String>,
    pub sku: String,
    pub ean: Option<String>,
    pub weight_grams: Option<i32>,
    pub deposit: Option<Decimal>,
    pub unit_price: Decimal,
    pub dimensions: Option<Dimensions>,
}

// Mellompakk: the inner pack / case containing base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mellompakk {
    pub pack_type: PackType,
    #[schema(example = 24)]
    pub quantity_per_box: i64,
    pub ean: Option<String>,
    pub price_per_box: Option<Decimal>,
    pub weight_grams: Option<i32>,
    pub dimensions: Option<Dimensions>,
    // Only for mixed packs: which base units go in, referencing Fpakk SKUs.
    pub contents: Option<Vec<PackContentLine>>,
}

// Toppakk: the outer pallet containing inner packs.
// `total_units` is derived (boxes_per_pallet * quantity_per_box) and is
// recomputed server-side on every save; the stored value is never trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Toppakk {
    pub pack_type: PackType,
    #[schema(example = "EUR")]
    pub pallet_type: Option<String>,
    #[schema(example = 30)]
    pub boxes_per_pallet: i64,
    pub total_units: i64,
    pub price_per_pallet: Option<Decimal>,
    pub weight_grams: Option<i32>,
    pub dimensions: Option<Dimensions>,
    pub contents: Option<Vec<PackContentLine>>,
}

// --- PRODUCT ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub description: String,
    pub country: Option<String>,
    pub manufacturer: Option<String>,
    pub ean_number: Option<String>,
    pub alcohol_percentage: Option<Decimal>,

    pub structure: ProductStructure,
    #[schema(value_type = Option<Fpakk>)]
    pub fpakk: Option<Json<Fpakk>>,
    #[schema(value_type = Option<Mellompakk>)]
    pub mellompakk: Option<Json<Mellompakk>>,
    #[schema(value_type = Option<Toppakk>)]
    pub toppakk: Option<Json<Toppakk>>,

    pub base_price: Decimal,
    #[schema(example = "NOK")]
    pub currency: String,
    pub status: ProductStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The two packaging multipliers the total-unit calculation needs.
    /// Missing tiers yield `None` so incomplete configurations degrade to
    /// partial totals instead of failing.
    pub fn packaging_multipliers(&self) -> (Option<i64>, Option<i64>) {
        let quantity_per_box = self.mellompakk.as_ref().map(|m| m.0.quantity_per_box);
        let boxes_per_pallet = self.toppakk.as_ref().map(|t| t.0.boxes_per_pallet);
        (quantity_per_box, boxes_per_pallet)
    }
}

// What create/update carries before the configuration has been checked.
// Field names match the `Product` columns; `structure` is still optional
// because "structure is missing" must come back as a validation message,
// not a deserialization failure.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub description: String,
    pub country: Option<String>,
    pub manufacturer: Option<String>,
    pub ean_number: Option<String>,
    pub alcohol_percentage: Option<Decimal>,
    pub structure: Option<ProductStructure>,
    pub fpakk: Option<Fpakk>,
    pub mellompakk: Option<Mellompakk>,
    pub toppakk: Option<Toppakk>,
    pub base_price: Decimal,
    pub status: ProductStatus,
}
