// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ApplicationRepository, CompanyRepository, InventoryRepository, OrderRepository,
        ProductRepository, UserRepository,
    },
    services::{
        application_service::ApplicationService, auth::AuthService,
        catalog_service::CatalogService, company_service::CompanyService,
        document_service::DocumentService, inventory_service::InventoryService,
        order_service::OrderService,
    },
};

// The shared state accessible across the whole application
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub application_service: ApplicationService,
    pub company_service: CompanyService,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
    pub order_service: OrderService,
    pub document_service: DocumentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        // Connects to the database, propagating errors with '?'
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Database connection established!");

        // --- Wire up the dependency graph ---
        let user_repo = UserRepository::new(db_pool.clone());
        let application_repo = ApplicationRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            application_repo.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let application_service = ApplicationService::new(
            application_repo,
            company_repo.clone(),
            user_repo.clone(),
            db_pool.clone(),
        );
        let company_service =
            CompanyService::new(company_repo.clone(), user_repo, db_pool.clone());
        let catalog_service = CatalogService::new(
            product_repo.clone(),
            inventory_repo.clone(),
            db_pool.clone(),
        );
        let inventory_service = InventoryService::new(
            inventory_repo.clone(),
            product_repo.clone(),
            db_pool.clone(),
        );
        let order_service = OrderService::new(
            order_repo.clone(),
            inventory_repo,
            product_repo,
            db_pool.clone(),
        );
        let document_service = DocumentService::new(order_repo, company_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            application_service,
            company_service,
            catalog_service,
            inventory_service,
            order_service,
            document_service,
        })
    }
}
