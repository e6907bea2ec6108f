// src/services/company_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, UserRepository},
    models::company::Company,
};

#[derive(Clone)]
pub struct CompanyService {
    company_repo: CompanyRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl CompanyService {
    pub fn new(company_repo: CompanyRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self {
            company_repo,
            user_repo,
            pool,
        }
    }

    pub async fn list(&self) -> Result<Vec<Company>, AppError> {
        self.company_repo.list_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Company, AppError> {
        self.company_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    /// Suspends or restores an already-provisioned company. This is not part
    /// of the application review: `approved` stays untouched, only `active`
    /// moves, and the company's users are suspended with it.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<Company, AppError> {
        let mut tx = self.pool.begin().await?;

        let company = self.company_repo.set_active(&mut *tx, id, active).await?;
        self.user_repo
            .set_active_by_company(&mut *tx, id, active)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🏢 Company '{}' {}",
            company.name,
            if active { "reactivated" } else { "deactivated" }
        );

        Ok(company)
    }
}
