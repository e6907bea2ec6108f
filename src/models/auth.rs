// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// Maps the CREATE TYPE user_role from the database.
// `pending` and `rejected` track where the account's company application is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Customer,
    Pending,
    Rejected,
}

// A user account coming from the database.
// Admins are company-less; customers always carry their company's id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANT for security
    #[schema(ignore)]
    pub password_hash: String,

    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,

    pub role: UserRole,
    pub company_id: Option<Uuid>,
    pub approved: bool,
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this account may place orders.
    pub fn can_order(&self) -> bool {
        self.role == UserRole::Customer && self.approved && self.active && self.company_id.is_some()
    }
}

// Authentication response carrying the token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// The "claims" data inside the JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (user id)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}
