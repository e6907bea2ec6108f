// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

use crate::models::application::{Address, CompanyApplication, CompanyType, ContactPerson};

// A saved delivery address. Companies start with a single default entry
// synthesized from the application's delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub id: String,
    pub label: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub is_default: bool,
}

// An approved B2B customer. The row id is the id of the application it was
// approved from, so approving the same application twice converges on the
// same company instead of creating a duplicate.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub user_id: Uuid,

    pub name: String,
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
    #[schema(value_type = Vec<ShippingAddress>)]
    pub shipping_addresses: Json<Vec<ShippingAddress>>,

    pub active: bool,
    pub approved: bool,
    pub admin_notes: String,

    pub registered_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
}

impl Company {
    /// Builds the company record an approval creates: profile copied from the
    /// application, one default shipping address from the delivery address,
    /// and both authorization flags raised together.
    pub fn from_application(
        application: &CompanyApplication,
        admin_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        let delivery = &application.delivery_address.0;

        Self {
            id: application.id,
            user_id: application.user_id,
            name: application.company_name.clone(),
            org_number: application.org_number.clone(),
            company_type: application.company_type,
            contact_email: application.contact_email.clone(),
            contact_phone: application.contact_phone.clone(),
            contact_person: Json(application.contact_person.0.clone()),
            visiting_address: Json(application.visiting_address.0.clone()),
            billing_address: Json(application.billing_address.0.clone()),
            shipping_addresses: Json(vec![ShippingAddress {
                id: "default".to_string(),
                label: "Default Delivery Address".to_string(),
                street: delivery.street.clone(),
                zip: delivery.zip.clone(),
                city: delivery.city.clone(),
                country: delivery.country.clone(),
                is_default: true,
            }]),
            active: true,
            approved: true,
            admin_notes: application.comments.clone().unwrap_or_default(),
            registered_at: application.submitted_at,
            approved_at: Some(now),
            approved_by: Some(admin_id),
        }
    }
}
