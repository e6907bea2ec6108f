// src/services/catalog_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, ProductRepository},
    models::product::{Product, ProductDraft, ProductStatus},
    services::packaging,
};

#[derive(Clone)]
pub struct CatalogService {
    product_repo: ProductRepository,
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

/// Recomputes the values on the draft that are derived from other fields.
/// Today that is the Toppakk's total unit count: it always comes from
/// boxes_per_pallet * quantity_per_box, never from the client.
fn recompute_derived(draft: &mut ProductDraft) {
    if let Some(toppakk) = draft.toppakk.as_mut() {
        let quantity_per_box = draft
            .mellompakk
            .as_ref()
            .map(|m| m.quantity_per_box)
            .unwrap_or(0);
        toppakk.total_units =
            packaging::calculate_toppakk_total_units(toppakk.boxes_per_pallet, quantity_per_box);
    }
}

impl CatalogService {
    pub fn new(
        product_repo: ProductRepository,
        inventory_repo: InventoryRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            product_repo,
            inventory_repo,
            pool,
        }
    }

    /// Validates the packaging configuration, fixes up derived fields and
    /// creates the product together with its (empty) stock row.
    pub async fn create_product(
        &self,
        mut draft: ProductDraft,
        fpakk_threshold: i64,
        mellompakk_threshold: i64,
        toppakk_threshold: i64,
    ) -> Result<Product, AppError> {
        let report = packaging::validate_product_configuration(&draft);
        if !report.valid {
            return Err(AppError::ProductConfiguration(report.errors));
        }
        // A valid report guarantees the structure is present.
        let structure = draft
            .structure
            .ok_or_else(|| anyhow::anyhow!("validated draft lost its structure"))?;

        recompute_derived(&mut draft);

        let mut tx = self.pool.begin().await?;

        let product = self.product_repo.create(&mut *tx, &draft, structure).await?;
        self.inventory_repo
            .init(
                &mut *tx,
                product.id,
                fpakk_threshold,
                mellompakk_threshold,
                toppakk_threshold,
            )
            .await?;

        tx.commit().await?;

        tracing::info!("📦 Product '{}' ({}) created", product.name, product.sku);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        mut draft: ProductDraft,
    ) -> Result<Product, AppError> {
        let report = packaging::validate_product_configuration(&draft);
        if !report.valid {
            return Err(AppError::ProductConfiguration(report.errors));
        }
        let structure = draft
            .structure
            .ok_or_else(|| anyhow::anyhow!("validated draft lost its structure"))?;

        recompute_derived(&mut draft);

        let mut tx = self.pool.begin().await?;
        let product = self
            .product_repo
            .update(&mut *tx, id, &draft, structure)
            .await?;
        tx.commit().await?;

        Ok(product)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn list_products(
        &self,
        status: Option<ProductStatus>,
    ) -> Result<Vec<Product>, AppError> {
        self.product_repo.list(status).await
    }

    /// What customers browse: active products only.
    pub async fn list_storefront(&self) -> Result<Vec<Product>, AppError> {
        self.product_repo.list(Some(ProductStatus::Active)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Fpakk, Mellompakk, PackType, ProductStructure, Toppakk};
    use rust_decimal::Decimal;

    fn hierarchical_draft() -> ProductDraft {
        ProductDraft {
            name: "Pilsner".to_string(),
            sku: "BON-PIL-001".to_string(),
            category: "Beer".to_string(),
            description: String::new(),
            country: None,
            manufacturer: None,
            ean_number: None,
            alcohol_percentage: None,
            structure: Some(ProductStructure::Hierarchical),
            fpakk: Some(Fpakk {
                name: "Bottle 0.5L".to_string(),
                size: "0.5L".to_string(),
                variant: None,
                sku: "BON-PIL-001-F".to_string(),
                ean: None,
                weight_grams: None,
                deposit: None,
                unit_price: Decimal::new(2995, 2),
                dimensions: None,
            }),
            mellompakk: Some(Mellompakk {
                pack_type: PackType::Homogeneous,
                quantity_per_box: 24,
                ean: None,
                price_per_box: None,
                weight_grams: None,
                dimensions: None,
                contents: None,
            }),
            toppakk: Some(Toppakk {
                pack_type: PackType::Homogeneous,
                pallet_type: Some("EUR".to_string()),
                boxes_per_pallet: 30,
                total_units: 9999, // deliberately wrong, must be recomputed
                price_per_pallet: None,
                weight_grams: None,
                dimensions: None,
                contents: None,
            }),
            base_price: Decimal::new(2995, 2),
            status: ProductStatus::Draft,
        }
    }

    #[test]
    fn pallet_total_is_never_trusted_from_the_client() {
        let mut draft = hierarchical_draft();
        recompute_derived(&mut draft);
        assert_eq!(draft.toppakk.as_ref().map(|t| t.total_units), Some(720));
    }

    #[test]
    fn pallet_total_degrades_to_zero_without_an_inner_pack() {
        let mut draft = hierarchical_draft();
        draft.mellompakk = None;
        recompute_derived(&mut draft);
        assert_eq!(draft.toppakk.as_ref().map(|t| t.total_units), Some(0));
    }
}
