// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Inventory, PackagingLevel},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, product_id: Uuid) -> Result<Option<Inventory>, AppError> {
        let inventory =
            sqlx::query_as::<_, Inventory>("SELECT * FROM inventory_levels WHERE product_id = $1")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(inventory)
    }

    pub async fn list_all(&self) -> Result<Vec<Inventory>, AppError> {
        let levels = sqlx::query_as::<_, Inventory>(
            "SELECT * FROM inventory_levels ORDER BY product_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(levels)
    }

    /// Creates the stock row for a new product. Counts start at zero; only
    /// the low-stock thresholds come from the caller.
    pub async fn init<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        fpakk_threshold: i64,
        mellompakk_threshold: i64,
        toppakk_threshold: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO inventory_levels (product_id, fpakk_threshold, mellompakk_threshold, toppakk_threshold)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (product_id) DO NOTHING
            "#,
        )
        .bind(product_id)
        .bind(fpakk_threshold)
        .bind(mellompakk_threshold)
        .bind(toppakk_threshold)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Adds a (possibly negative) quantity to one tier's count.
    /// This is an UPSERT: it inserts the row if the product has never had
    /// stock, otherwise adds to the existing count atomically.
    pub async fn add_to_level<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        level: PackagingLevel,
        quantity: i64,
    ) -> Result<Inventory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // The column is chosen from a fixed set, never from user input.
        let column = match level {
            PackagingLevel::Fpakk => "fpakk_count",
            PackagingLevel::Mellompakk => "mellompakk_count",
            PackagingLevel::Toppakk => "toppakk_count",
        };

        let sql = format!(
            r#"
            INSERT INTO inventory_levels (product_id, {column})
            VALUES ($1, $2)
            ON CONFLICT (product_id)
            DO UPDATE SET
                {column} = inventory_levels.{column} + $2,
                updated_at = NOW()
            RETURNING *
            "#,
        );

        let inventory = sqlx::query_as::<_, Inventory>(&sql)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(executor)
            .await?;

        Ok(inventory)
    }

    /// Deducts loose base units, guarded against going negative.
    /// Returns the fresh row, or None when there was not enough stock.
    pub async fn consume_fpakk<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i64,
    ) -> Result<Option<Inventory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let inventory = sqlx::query_as::<_, Inventory>(
            r#"
            UPDATE inventory_levels
            SET fpakk_count = fpakk_count - $2, updated_at = NOW()
            WHERE product_id = $1 AND fpakk_count >= $2
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(executor)
        .await?;

        Ok(inventory)
    }

    /// Puts base units back (order cancellation).
    pub async fn restore_fpakk<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE inventory_levels
            SET fpakk_count = fpakk_count + $2, updated_at = NOW()
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(())
    }
}
