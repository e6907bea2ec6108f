// src/services/packaging.rs
//
// Pure packaging math. Everything here is side-effect free: callers persist
// the results and re-invoke whenever an input changes.

use crate::models::inventory::{Inventory, PackagingLevel};
use crate::models::product::{Product, ProductDraft, ProductStructure};

/// Calculates the total number of base units from the counts at each
/// packaging tier.
///
/// For `simple` products only the loose base-unit count matters; inner and
/// outer counts are ignored even if they are (wrongly) non-zero. For
/// `hierarchical` products the multipliers come from the product's packaging
/// definition; a missing multiplier counts as 0 so an incompletely configured
/// product reports a partial total instead of failing.
pub fn calculate_total_units(
    inventory: &Inventory,
    structure: ProductStructure,
    quantity_per_box: Option<i64>,
    boxes_per_pallet: Option<i64>,
) -> i64 {
    if structure == ProductStructure::Simple {
        return inventory.fpakk_count;
    }

    let units_per_mellompakk = quantity_per_box.unwrap_or(0);
    let mellompakks_per_toppakk = boxes_per_pallet.unwrap_or(0);

    let units_from_mellompakk = inventory.mellompakk_count * units_per_mellompakk;
    let units_from_toppakk =
        inventory.toppakk_count * mellompakks_per_toppakk * units_per_mellompakk;

    inventory.fpakk_count + units_from_mellompakk + units_from_toppakk
}

/// Total base units in a single Toppakk (pallet).
pub fn calculate_toppakk_total_units(boxes_per_pallet: i64, quantity_per_box: i64) -> i64 {
    boxes_per_pallet * quantity_per_box
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validates a product configuration before saving.
///
/// Collects every violated rule so the form can show all problems at once.
pub fn validate_product_configuration(product: &ProductDraft) -> ConfigurationReport {
    let mut errors = Vec::new();

    if product.name.trim().is_empty() {
        errors.push("Product name is required".to_string());
    }
    if product.structure.is_none() {
        errors.push("Product structure is required".to_string());
    }

    match product.structure {
        Some(ProductStructure::Hierarchical) => {
            if product.fpakk.is_none() {
                errors.push(
                    "Fpakk (base unit) details are required for hierarchical products".to_string(),
                );
            }
            if product.mellompakk.is_none() {
                errors.push(
                    "Mellompakk (inner pack) details are required for hierarchical products"
                        .to_string(),
                );
            }
            if product.toppakk.is_none() {
                errors.push(
                    "Toppakk (outer case) details are required for hierarchical products"
                        .to_string(),
                );
            }

            if let Some(mellompakk) = &product.mellompakk {
                if mellompakk.quantity_per_box <= 0 {
                    errors.push("Mellompakk must contain at least 1 unit.".to_string());
                }
            }
            if let Some(toppakk) = &product.toppakk {
                if toppakk.boxes_per_pallet <= 0 {
                    errors.push("Toppakk must contain at least 1 pack.".to_string());
                }
            }
        }
        Some(ProductStructure::Simple) => {
            // A simple product must not smuggle in packaging tiers: the tiers
            // and their inventory counterparts stay absent together.
            if product.mellompakk.is_some() {
                errors.push("Simple products cannot have Mellompakk packaging".to_string());
            }
            if product.toppakk.is_some() {
                errors.push("Simple products cannot have Toppakk packaging".to_string());
            }
        }
        None => {}
    }

    ConfigurationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Renders a stock count at one tier as a human string, expanding it into
/// subordinate units (e.g. "3 kasser (72 stk)"). Falls back to the bare
/// quantity when the nested packaging data is missing.
pub fn format_packaging_level(level: PackagingLevel, quantity: i64, product: &Product) -> String {
    match level {
        PackagingLevel::Fpakk => format!("{} stk", quantity),
        PackagingLevel::Mellompakk => {
            if let Some(mellompakk) = &product.mellompakk {
                let total_units = quantity * mellompakk.0.quantity_per_box;
                format!("{} kasser ({} stk)", quantity, total_units)
            } else {
                format!("{}", quantity)
            }
        }
        PackagingLevel::Toppakk => {
            if let (Some(toppakk), Some(mellompakk)) = (&product.toppakk, &product.mellompakk) {
                let total_boxes = quantity * toppakk.0.boxes_per_pallet;
                let total_units = total_boxes * mellompakk.0.quantity_per_box;
                format!(
                    "{} paller ({} kasser, {} stk)",
                    quantity, total_boxes, total_units
                )
            } else {
                format!("{}", quantity)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{
        Fpakk, Mellompakk, PackType, ProductStatus, Toppakk,
    };
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn inventory(fpakk: i64, mellompakk: i64, toppakk: i64) -> Inventory {
        Inventory {
            product_id: Uuid::nil(),
            fpakk_count: fpakk,
            mellompakk_count: mellompakk,
            toppakk_count: toppakk,
            fpakk_threshold: 0,
            mellompakk_threshold: 0,
            toppakk_threshold: 0,
            updated_at: Utc::now(),
        }
    }

    fn fpakk() -> Fpakk {
        Fpakk {
            name: "Bottle 0.5L".to_string(),
            size: "0.5L".to_string(),
            variant: None,
            sku: "BON-PIL-001-F".to_string(),
            ean: None,
            weight_grams: Some(850),
            deposit: None,
            unit_price: Decimal::new(2995, 2),
            dimensions: None,
        }
    }

    fn mellompakk(quantity_per_box: i64) -> Mellompakk {
        Mellompakk {
            pack_type: PackType::Homogeneous,
            quantity_per_box,
            ean: None,
            price_per_box: None,
            weight_grams: None,
            dimensions: None,
            contents: None,
        }
    }

    fn toppakk(boxes_per_pallet: i64, quantity_per_box: i64) -> Toppakk {
        Toppakk {
            pack_type: PackType::Homogeneous,
            pallet_type: Some("EUR".to_string()),
            boxes_per_pallet,
            total_units: calculate_toppakk_total_units(boxes_per_pallet, quantity_per_box),
            price_per_pallet: None,
            weight_grams: None,
            dimensions: None,
            contents: None,
        }
    }

    fn hierarchical_product(quantity_per_box: i64, boxes_per_pallet: i64) -> Product {
        Product {
            id: Uuid::nil(),
            name: "Pilsner".to_string(),
            sku: "BON-PIL-001".to_string(),
            category: "Beer".to_string(),
            description: String::new(),
            country: Some("Norway".to_string()),
            manufacturer: None,
            ean_number: None,
            alcohol_percentage: None,
            structure: ProductStructure::Hierarchical,
            fpakk: Some(Json(fpakk())),
            mellompakk: Some(Json(mellompakk(quantity_per_box))),
            toppakk: Some(Json(toppakk(boxes_per_pallet, quantity_per_box))),
            base_price: Decimal::new(2995, 2),
            currency: "NOK".to_string(),
            status: ProductStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(structure: Option<ProductStructure>) -> ProductDraft {
        ProductDraft {
            name: "Pilsner".to_string(),
            sku: "BON-PIL-001".to_string(),
            category: "Beer".to_string(),
            description: String::new(),
            country: None,
            manufacturer: None,
            ean_number: None,
            alcohol_percentage: None,
            structure,
            fpakk: None,
            mellompakk: None,
            toppakk: None,
            base_price: Decimal::ZERO,
            status: ProductStatus::Draft,
        }
    }

    #[test]
    fn hierarchical_total_follows_the_packaging_algebra() {
        // f + m*q + t*b*q for a handful of combinations
        for (f, m, t, q, b) in [
            (0i64, 0i64, 0i64, 24i64, 30i64),
            (5, 2, 1, 24, 30),
            (10, 0, 3, 12, 8),
            (7, 13, 0, 6, 4),
        ] {
            let total = calculate_total_units(
                &inventory(f, m, t),
                ProductStructure::Hierarchical,
                Some(q),
                Some(b),
            );
            assert_eq!(total, f + m * q + t * b * q);
        }
    }

    #[test]
    fn stock_reception_scenario_totals_773() {
        // 5 loose + 2 cases of 24 + 1 pallet of 30 cases of 24
        let total = calculate_total_units(
            &inventory(5, 2, 1),
            ProductStructure::Hierarchical,
            Some(24),
            Some(30),
        );
        assert_eq!(total, 773);
    }

    #[test]
    fn simple_structure_ignores_pack_counts() {
        let total = calculate_total_units(
            &inventory(9, 55, 7),
            ProductStructure::Simple,
            Some(24),
            Some(30),
        );
        assert_eq!(total, 9);
    }

    #[test]
    fn missing_multipliers_default_to_zero() {
        let total =
            calculate_total_units(&inventory(5, 2, 1), ProductStructure::Hierarchical, None, None);
        assert_eq!(total, 5);

        // Inner multiplier alone still contributes the inner tier
        let total = calculate_total_units(
            &inventory(5, 2, 1),
            ProductStructure::Hierarchical,
            Some(24),
            None,
        );
        assert_eq!(total, 5 + 2 * 24);
    }

    #[test]
    fn total_is_monotonic_in_every_count() {
        let base = calculate_total_units(
            &inventory(5, 2, 1),
            ProductStructure::Hierarchical,
            Some(24),
            Some(30),
        );
        for bumped in [inventory(6, 2, 1), inventory(5, 3, 1), inventory(5, 2, 2)] {
            let total = calculate_total_units(
                &bumped,
                ProductStructure::Hierarchical,
                Some(24),
                Some(30),
            );
            assert!(total >= base);
        }
    }

    #[test]
    fn all_zero_counts_total_zero_for_both_structures() {
        for structure in [ProductStructure::Simple, ProductStructure::Hierarchical] {
            let total = calculate_total_units(&inventory(0, 0, 0), structure, Some(24), Some(30));
            assert_eq!(total, 0);
        }
    }

    #[test]
    fn toppakk_total_units_is_the_product_of_its_multipliers() {
        assert_eq!(calculate_toppakk_total_units(30, 24), 720);
        assert_eq!(calculate_toppakk_total_units(0, 24), 0);
    }

    #[test]
    fn fully_specified_hierarchical_product_is_valid() {
        let mut product = draft(Some(ProductStructure::Hierarchical));
        product.fpakk = Some(fpakk());
        product.mellompakk = Some(mellompakk(24));
        product.toppakk = Some(toppakk(30, 24));

        let report = validate_product_configuration(&product);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn missing_toppakk_is_reported_by_name() {
        let mut product = draft(Some(ProductStructure::Hierarchical));
        product.fpakk = Some(fpakk());
        product.mellompakk = Some(mellompakk(24));

        let report = validate_product_configuration(&product);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("Toppakk")));
    }

    #[test]
    fn every_violation_is_collected_not_just_the_first() {
        let mut product = draft(None);
        product.name = String::new();

        let report = validate_product_configuration(&product);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "Product name is required".to_string(),
                "Product structure is required".to_string(),
            ]
        );
    }

    #[test]
    fn zero_multipliers_are_rejected() {
        let mut product = draft(Some(ProductStructure::Hierarchical));
        product.fpakk = Some(fpakk());
        product.mellompakk = Some(mellompakk(0));
        product.toppakk = Some(toppakk(0, 0));

        let report = validate_product_configuration(&product);
        assert!(report.errors.contains(&"Mellompakk must contain at least 1 unit.".to_string()));
        assert!(report.errors.contains(&"Toppakk must contain at least 1 pack.".to_string()));
    }

    #[test]
    fn simple_products_cannot_carry_pack_tiers() {
        let mut product = draft(Some(ProductStructure::Simple));
        product.fpakk = Some(fpakk());
        product.mellompakk = Some(mellompakk(24));

        let report = validate_product_configuration(&product);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("Mellompakk")));
    }

    #[test]
    fn formats_each_level_in_norwegian() {
        let product = hierarchical_product(24, 30);

        assert_eq!(
            format_packaging_level(PackagingLevel::Fpakk, 5, &product),
            "5 stk"
        );
        assert_eq!(
            format_packaging_level(PackagingLevel::Mellompakk, 3, &product),
            "3 kasser (72 stk)"
        );
        assert_eq!(
            format_packaging_level(PackagingLevel::Toppakk, 2, &product),
            "2 paller (60 kasser, 1440 stk)"
        );
    }

    #[test]
    fn formatting_falls_back_to_the_bare_quantity() {
        let mut product = hierarchical_product(24, 30);
        product.mellompakk = None;

        assert_eq!(
            format_packaging_level(PackagingLevel::Mellompakk, 3, &product),
            "3"
        );
        // Toppakk expansion needs both nested records
        assert_eq!(
            format_packaging_level(PackagingLevel::Toppakk, 2, &product),
            "2"
        );
    }
}
