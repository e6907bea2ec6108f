// src/models/application.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "company_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompanyType {
    Horeca,
    Distributor,
    Other,
}

// --- NESTED RECORDS (stored as JSONB) ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub first_name: String,
    pub last_name: String,
}

// --- COMPANY APPLICATION ---

// A pending B2B registration. Created once at signup, reviewed exactly once.
// The audit fields (reviewed_at / reviewed_by / rejection_reason) stay empty
// until an admin takes action.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyApplication {
    pub id: Uuid,
    pub user_id: Uuid,

    pub company_name: String,
    pub org_number: String,
    pub company_type: CompanyType,

    pub contact_email: String,
    pub contact_phone: String,

    #[schema(value_type = ContactPerson)]
    pub contact_person: Json<ContactPerson>,

    #[schema(value_type = Address)]
    pub visiting_address: Json<Address>,
    #[schema(value_type = Address)]
    pub billing_address: Json<Address>,
    #[schema(value_type = Address)]
    pub delivery_address: Json<Address>,

    pub comments: Option<String>,

    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
}
