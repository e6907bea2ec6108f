// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// Which packaging tier a stock count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PackagingLevel {
    Fpakk,
    Mellompakk,
    Toppakk,
}

// Per-product stock counts at each packaging tier.
// Note there is no total_units column: the total is derived from these
// counts and the product's multipliers on every read, so it can never
// drift out of sync with its inputs.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub product_id: Uuid,
    pub fpakk_count: i64,
    pub mellompakk_count: i64,
    pub toppakk_count: i64,
    pub fpakk_threshold: i64,
    pub mellompakk_threshold: i64,
    pub toppakk_threshold: i64,
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    pub fn count_at(&self, level: PackagingLevel) -> i64 {
        match level {
            PackagingLevel::Fpakk => self.fpakk_count,
            PackagingLevel::Mellompakk => self.mellompakk_count,
            PackagingLevel::Toppakk => self.toppakk_count,
        }
    }
}

// What the stock endpoints return: the raw counts plus the values that are
// always computed, never stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub fpakk_count: i64,
    pub mellompakk_count: i64,
    pub toppakk_count: i64,
    #[schema(example = 773)]
    pub total_units: i64,
    pub low_stock: bool,
    pub updated_at: DateTime<Utc>,
}
