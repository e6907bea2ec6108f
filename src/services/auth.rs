// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ApplicationRepository, UserRepository},
    models::application::{Address, CompanyApplication, CompanyType, ContactPerson},
    models::auth::{Claims, User, UserRole},
};

// Everything the signup form collects, with the address aliasing
// ("billing = visiting", "delivery = billing") already resolved by the
// handler, so the service always sees three concrete addresses.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub company_name: String,
    pub org_number: String,
    pub company_type: CompanyType,
    pub visiting_address: Address,
    pub billing_address: Address,
    pub delivery_address: Address,
    pub comments: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    application_repo: ApplicationRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        application_repo: ApplicationRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            application_repo,
            jwt_secret,
            pool,
        }
    }

    /// B2B signup: creates the (inactive) user account and its company
    /// application together. The account stays `pending` until an admin
    /// reviews the application.
    pub async fn register_application(
        &self,
        data: SignupData,
    ) -> Result<CompanyApplication, AppError> {
        // 1. Hashing (outside the transaction, it never touches the database)
        let password = data.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Hashing task failed: {}", e))??;

        // 2. User + application are created in one transaction: a signup
        // never leaves an account without an application behind it.
        let mut tx = self.pool.begin().await?;

        let new_user = self
            .user_repo
            .create_user(
                &mut *tx,
                &data.email,
                &hashed_password,
                &data.first_name,
                &data.last_name,
                Some(&data.phone),
                UserRole::Pending,
                false,
                false,
            )
            .await?;

        let application = self
            .application_repo
            .create(
                &mut *tx,
                new_user.id,
                &data.company_name,
                &data.org_number,
                data.company_type,
                &data.email,
                &data.phone,
                &ContactPerson {
                    first_name: data.first_name.clone(),
                    last_name: data.last_name.clone(),
                },
                &data.visiting_address,
                &data.billing_address,
                &data.delivery_address,
                data.comments.as_deref(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "📥 New company application from '{}' ({})",
            application.company_name,
            application.contact_email
        );

        Ok(application)
    }

    /// First-run bootstrap: creates the company-less admin account.
    /// Only works while no admin exists yet.
    pub async fn register_admin(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, AppError> {
        if self.user_repo.admin_exists().await? {
            return Err(AppError::AdminAlreadyExists);
        }

        let password = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Hashing task failed: {}", e))??;

        let admin = self
            .user_repo
            .create_user(
                &self.pool,
                email,
                &hashed_password,
                first_name,
                last_name,
                None,
                UserRole::Admin,
                true, // admins are pre-approved
                true,
            )
            .await?;

        self.create_token(admin.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();

        // Runs the verification on a blocking thread
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Pending and rejected accounts may still log in to check their
        // application status; `active` only gates ordering.
        self.user_repo.touch_last_login(user.id).await?;

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
