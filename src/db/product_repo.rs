// src/db/product_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{Product, ProductDraft, ProductStatus, ProductStructure},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn list(&self, status: Option<ProductStatus>) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1::product_status IS NULL OR status = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Inserts a catalog product. The caller (the catalog service) has
    /// already validated the packaging configuration and recomputed the
    /// derived pallet totals.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        draft: &ProductDraft,
        structure: ProductStructure,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                name, sku, category, description, country, manufacturer,
                ean_number, alcohol_percentage, structure,
                fpakk, mellompakk, toppakk, base_price, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.sku)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(draft.country.as_deref())
        .bind(draft.manufacturer.as_deref())
        .bind(draft.ean_number.as_deref())
        .bind(draft.alcohol_percentage)
        .bind(structure)
        .bind(draft.fpakk.as_ref().map(Json))
        .bind(draft.mellompakk.as_ref().map(Json))
        .bind(draft.toppakk.as_ref().map(Json))
        .bind(draft.base_price)
        .bind(draft.status)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &ProductDraft,
        structure: ProductStructure,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, sku = $3, category = $4, description = $5,
                country = $6, manufacturer = $7, ean_number = $8,
                alcohol_percentage = $9, structure = $10,
                fpakk = $11, mellompakk = $12, toppakk = $13,
                base_price = $14, status = $15, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.sku)
        .bind(&draft.category)
        .bind(&draft.description)
        .bind(draft.country.as_deref())
        .bind(draft.manufacturer.as_deref())
        .bind(draft.ean_number.as_deref())
        .bind(draft.alcohol_percentage)
        .bind(structure)
        .bind(draft.fpakk.as_ref().map(Json))
        .bind(draft.mellompakk.as_ref().map(Json))
        .bind(draft.toppakk.as_ref().map(Json))
        .bind(draft.base_price)
        .bind(draft.status)
        .fetch_optional(executor)
        .await
        .map_err(|e: sqlx::Error| -> AppError {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists;
                }
            }
            e.into()
        })?;

        product.ok_or(AppError::ProductNotFound)
    }
}
