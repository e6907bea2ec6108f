// src/db/application_repo.rs

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::application::{Address, ApplicationStatus, CompanyApplication, CompanyType, ContactPerson},
};

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Reads
    // ---

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CompanyApplication>, AppError> {
        let application = sqlx::query_as::<_, CompanyApplication>(
            "SELECT * FROM company_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    /// Locks the application row for the duration of a review transaction so
    /// two admins cannot race each other through the same approval.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<CompanyApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let application = sqlx::query_as::<_, CompanyApplication>(
            "SELECT * FROM company_applications WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(application)
    }

    pub async fn list_by_status(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<CompanyApplication>, AppError> {
        let applications = sqlx::query_as::<_, CompanyApplication>(
            r#"
            SELECT * FROM company_applications
            WHERE ($1::application_status IS NULL OR status = $1)
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    // ---
    // Writes (transactional)
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        company_name: &str,
        org_number: &str,
        company_type: CompanyType,
        contact_email: &str,
        contact_phone: &str,
        contact_person: &ContactPerson,
        visiting_address: &Address,
        billing_address: &Address,
        delivery_address: &Address,
        comments: Option<&str>,
    ) -> Result<CompanyApplication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let application = sqlx::query_as::<_, CompanyApplication>(
            r#"
            INSERT INTO company_applications (
                user_id, company_name, org_number, company_type,
                contact_email, contact_phone, contact_person,
                visiting_address, billing_address, delivery_address, comments
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(company_name)
        .bind(org_number)
        .bind(company_type)
        .bind(contact_email)
        .bind(contact_phone)
        .bind(Json(contact_person))
        .bind(Json(visiting_address))
        .bind(Json(billing_address))
        .bind(Json(delivery_address))
        .bind(comments)
        .fetch_one(executor)
        .await?;

        Ok(application)
    }

    pub async fn mark_approved<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        admin_id: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> Result<CompanyApplication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let application = sqlx::query_as::<_, CompanyApplication>(
            r#"
            UPDATE company_applications
            SET status = 'approved', reviewed_at = $3, reviewed_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .bind(reviewed_at)
        .fetch_optional(executor)
        .await?;

        application.ok_or(AppError::ApplicationNotFound)
    }

    pub async fn mark_rejected<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        admin_id: Uuid,
        reason: &str,
        reviewed_at: DateTime<Utc>,
    ) -> Result<CompanyApplication, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let application = sqlx::query_as::<_, CompanyApplication>(
            r#"
            UPDATE company_applications
            SET status = 'rejected', reviewed_at = $4, reviewed_by = $2, rejection_reason = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .bind(reason)
        .bind(reviewed_at)
        .fetch_optional(executor)
        .await?;

        application.ok_or(AppError::ApplicationNotFound)
    }
}
