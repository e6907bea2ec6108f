// src/services/inventory_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, ProductRepository},
    models::inventory::{Inventory, InventoryView, PackagingLevel},
    models::product::{Product, ProductStructure},
    services::packaging,
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

/// Assembles the API view of a stock row. The total unit count and the
/// low-stock flag are derived here on every read; storage only holds the
/// per-tier counts, so the derivation can never drift.
fn build_view(product: &Product, inventory: &Inventory) -> InventoryView {
    let (quantity_per_box, boxes_per_pallet) = product.packaging_multipliers();
    let total_units = packaging::calculate_total_units(
        inventory,
        product.structure,
        quantity_per_box,
        boxes_per_pallet,
    );

    // A threshold of 0 means "no alert configured" for that tier.
    let below = |count: i64, threshold: i64| threshold > 0 && count < threshold;
    let low_stock = below(inventory.fpakk_count, inventory.fpakk_threshold)
        || below(inventory.mellompakk_count, inventory.mellompakk_threshold)
        || below(inventory.toppakk_count, inventory.toppakk_threshold);

    InventoryView {
        product_id: product.id,
        product_name: product.name.clone(),
        sku: product.sku.clone(),
        fpakk_count: inventory.fpakk_count,
        mellompakk_count: inventory.mellompakk_count,
        toppakk_count: inventory.toppakk_count,
        total_units,
        low_stock,
        updated_at: inventory.updated_at,
    }
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        product_repo: ProductRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            inventory_repo,
            product_repo,
            pool,
        }
    }

    /// Varemottak: registers incoming goods at one packaging tier.
    /// Returns the fresh stock view plus the human summary line
    /// (e.g. "3 kasser (72 stk)") for the confirmation toast.
    pub async fn receive_stock(
        &self,
        product_id: Uuid,
        level: PackagingLevel,
        quantity: i64,
    ) -> Result<(InventoryView, String), AppError> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        // A simple product has nothing above the base unit to receive at.
        if product.structure == ProductStructure::Simple && level != PackagingLevel::Fpakk {
            return Err(AppError::ProductConfiguration(vec![
                "Simple products only hold loose base units".to_string(),
            ]));
        }

        let mut tx = self.pool.begin().await?;
        let inventory = self
            .inventory_repo
            .add_to_level(&mut *tx, product_id, level, quantity)
            .await?;
        tx.commit().await?;

        let summary = packaging::format_packaging_level(level, quantity, &product);
        tracing::info!("📈 Stock reception for '{}': {}", product.name, summary);

        Ok((build_view(&product, &inventory), summary))
    }

    pub async fn get_view(&self, product_id: Uuid) -> Result<InventoryView, AppError> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        let inventory = self
            .inventory_repo
            .get(product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        Ok(build_view(&product, &inventory))
    }

    /// The admin stock page: one row per product, totals recomputed.
    pub async fn list_views(&self) -> Result<Vec<InventoryView>, AppError> {
        let products = self.product_repo.list(None).await?;

        let mut views = Vec::with_capacity(products.len());
        for product in &products {
            if let Some(inventory) = self.inventory_repo.get(product.id).await? {
                views.push(build_view(product, &inventory));
            }
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Fpakk, Mellompakk, PackType, ProductStatus, Toppakk};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;

    fn product() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Pilsner".to_string(),
            sku: "BON-PIL-001".to_string(),
            category: "Beer".to_string(),
            description: String::new(),
            country: None,
            manufacturer: None,
            ean_number: None,
            alcohol_percentage: None,
            structure: ProductStructure::Hierarchical,
            fpakk: Some(Json(Fpakk {
                name: "Bottle 0.5L".to_string(),
                size: "0.5L".to_string(),
                variant: None,
                sku: "BON-PIL-001-F".to_string(),
                ean: None,
                weight_grams: None,
                deposit: None,
                unit_price: Decimal::new(2995, 2),
                dimensions: None,
            })),
            mellompakk: Some(Json(Mellompakk {
                pack_type: PackType::Homogeneous,
                quantity_per_box: 24,
                ean: None,
                price_per_box: None,
                weight_grams: None,
                dimensions: None,
                contents: None,
            })),
            toppakk: Some(Json(Toppakk {
                pack_type: PackType::Homogeneous,
                pallet_type: None,
                boxes_per_pallet: 30,
                total_units: 720,
                price_per_pallet: None,
                weight_grams: None,
                dimensions: None,
                contents: None,
            })),
            base_price: Decimal::new(2995, 2),
            currency: "NOK".to_string(),
            status: ProductStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn inventory(product_id: Uuid, f: i64, m: i64, t: i64, f_threshold: i64) -> Inventory {
        Inventory {
            product_id,
            fpakk_count: f,
            mellompakk_count: m,
            toppakk_count: t,
            fpakk_threshold: f_threshold,
            mellompakk_threshold: 0,
            toppakk_threshold: 0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn the_view_recomputes_the_total_from_the_counts() {
        let product = product();
        let inventory = inventory(product.id, 5, 2, 1, 0);

        let view = build_view(&product, &inventory);
        assert_eq!(view.total_units, 773);
        assert!(!view.low_stock);
    }

    #[test]
    fn low_stock_is_flagged_per_tier_threshold() {
        let product = product();

        let view = build_view(&product, &inventory(product.id, 3, 10, 10, 5));
        assert!(view.low_stock);

        // Threshold 0 means no alert, however low the count
        let view = build_view(&product, &inventory(product.id, 0, 0, 0, 0));
        assert!(!view.low_stock);
    }
}
