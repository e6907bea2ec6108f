// src/db/company_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::company::Company};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn list_all(&self) -> Result<Vec<Company>, AppError> {
        let companies =
            sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY registered_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(companies)
    }

    /// Writes the company an approval produces. This is an UPSERT keyed on
    /// the application id: retrying an approval overwrites the row with the
    /// same values instead of failing or duplicating.
    pub async fn upsert<'e, E>(&self, executor: E, company: &Company) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let saved = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, user_id, name, org_number, company_type,
                contact_email, contact_phone, contact_person,
                visiting_address, billing_address, shipping_addresses,
                active, approved, admin_notes,
                registered_at, approved_at, approved_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                org_number = EXCLUDED.org_number,
                company_type = EXCLUDED.company_type,
                contact_email = EXCLUDED.contact_email,
                contact_phone = EXCLUDED.contact_phone,
                contact_person = EXCLUDED.contact_person,
                visiting_address = EXCLUDED.visiting_address,
                billing_address = EXCLUDED.billing_address,
                shipping_addresses = EXCLUDED.shipping_addresses,
                active = EXCLUDED.active,
                approved = EXCLUDED.approved,
                admin_notes = EXCLUDED.admin_notes,
                registered_at = EXCLUDED.registered_at,
                approved_at = EXCLUDED.approved_at,
                approved_by = EXCLUDED.approved_by
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(company.user_id)
        .bind(&company.name)
        .bind(&company.org_number)
        .bind(company.company_type)
        .bind(&company.contact_email)
        .bind(&company.contact_phone)
        .bind(Json(&company.contact_person.0))
        .bind(Json(&company.visiting_address.0))
        .bind(Json(&company.billing_address.0))
        .bind(Json(&company.shipping_addresses.0))
        .bind(company.active)
        .bind(company.approved)
        .bind(&company.admin_notes)
        .bind(company.registered_at)
        .bind(company.approved_at)
        .bind(company.approved_by)
        .fetch_one(executor)
        .await?;

        Ok(saved)
    }

    /// Deactivation / reactivation of an already-provisioned company. This is
    /// a company-level switch, not an application review: `approved` is left
    /// untouched.
    pub async fn set_active<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        active: bool,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            "UPDATE companies SET active = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(executor)
        .await?;

        company.ok_or(AppError::CompanyNotFound)
    }
}
