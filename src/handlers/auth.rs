// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::application::{Address, CompanyType},
    models::auth::AuthResponse,
    services::auth::SignupData,
};

// ---
// Payload: Signup (the B2B application form)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    #[validate(length(min = 1, message = "Company name is required."))]
    #[schema(example = "The Grand Hotel")]
    pub company_name: String,

    #[validate(length(min = 1, message = "Organization number is required."))]
    #[schema(example = "987654321")]
    pub org_number: String,

    #[schema(example = "horeca")]
    pub company_type: CompanyType,

    #[validate(email(message = "Invalid business email address."))]
    #[schema(example = "post@grandhotel.no")]
    pub contact_email: String,

    #[validate(length(min = 1, message = "Phone number is required."))]
    #[schema(example = "+47 123 45 678")]
    pub contact_phone: String,

    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,

    #[validate(length(min = 1, message = "Visiting address is required."))]
    pub visiting_address_street: String,
    #[validate(length(min = 1, message = "Postal code is required."))]
    pub visiting_address_zip: String,
    #[validate(length(min = 1, message = "City is required."))]
    pub visiting_address_city: String,

    #[serde(default)]
    pub use_visiting_as_billing: bool,
    pub billing_address_street: Option<String>,
    pub billing_address_zip: Option<String>,
    pub billing_address_city: Option<String>,

    #[serde(default)]
    pub use_billing_as_delivery: bool,
    pub delivery_address_street: Option<String>,
    pub delivery_address_zip: Option<String>,
    pub delivery_address_city: Option<String>,

    pub comments: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,

    #[serde(default)]
    pub accept_terms: bool,
}

impl SignupPayload {
    // Cross-field rules the derive cannot express: the optional address
    // blocks become required when their "same as" checkbox is off.
    fn validate_consistency(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        let missing = |value: &Option<String>| value.as_deref().unwrap_or("").is_empty();

        if !self.use_visiting_as_billing {
            if missing(&self.billing_address_street) {
                errors.add("billingAddressStreet", required("Billing address is required."));
            }
            if missing(&self.billing_address_zip) {
                errors.add("billingAddressZip", required("Postal code is required."));
            }
            if missing(&self.billing_address_city) {
                errors.add("billingAddressCity", required("City is required."));
            }
        }

        if !self.use_billing_as_delivery {
            if missing(&self.delivery_address_street) {
                errors.add("deliveryAddressStreet", required("Delivery address is required."));
            }
            if missing(&self.delivery_address_zip) {
                errors.add("deliveryAddressZip", required("Postal code is required."));
            }
            if missing(&self.delivery_address_city) {
                errors.add("deliveryAddressCity", required("City is required."));
            }
        }

        if !self.accept_terms {
            errors.add(
                "acceptTerms",
                required("You must accept the terms and conditions."),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // Resolves the "same as" checkboxes into three concrete addresses.
    fn resolve_addresses(&self) -> (Address, Address, Address) {
        let country = "Norway".to_string();

        let visiting = Address {
            street: self.visiting_address_street.clone(),
            zip: self.visiting_address_zip.clone(),
            city: self.visiting_address_city.clone(),
            country: country.clone(),
        };

        let billing = if self.use_visiting_as_billing {
            visiting.clone()
        } else {
            Address {
                street: self.billing_address_street.clone().unwrap_or_default(),
                zip: self.billing_address_zip.clone().unwrap_or_default(),
                city: self.billing_address_city.clone().unwrap_or_default(),
                country: country.clone(),
            }
        };

        let delivery = if self.use_billing_as_delivery {
            billing.clone()
        } else {
            Address {
                street: self.delivery_address_street.clone().unwrap_or_default(),
                zip: self.delivery_address_zip.clone().unwrap_or_default(),
                city: self.delivery_address_city.clone().unwrap_or_default(),
                country,
            }
        };

        (visiting, billing, delivery)
    }
}

fn required(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("required");
    err.message = Some(message.into());
    err
}

// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Application submitted, pending admin approval"),
        (status = 409, description = "E-mail already registered")
    )
)]
pub async fn signup(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload
        .validate_consistency()
        .map_err(AppError::ValidationError)?;

    let (visiting_address, billing_address, delivery_address) = payload.resolve_addresses();

    let application = app_state
        .auth_service
        .register_application(SignupData {
            email: payload.contact_email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.contact_phone,
            company_name: payload.company_name,
            org_number: payload.org_number,
            company_type: payload.company_type,
            visiting_address,
            billing_address,
            delivery_address,
            comments: payload.comments,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

// ---
// Payload: RegisterAdmin (first-run bootstrap)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminPayload {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
}

// POST /api/auth/register-admin
#[utoipa::path(
    post,
    path = "/api/auth/register-admin",
    tag = "Auth",
    request_body = RegisterAdminPayload,
    responses(
        (status = 201, description = "Admin account created", body = AuthResponse),
        (status = 409, description = "An admin account already exists")
    )
)]
pub async fn register_admin(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterAdminPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .register_admin(
            &payload.email,
            &payload.password,
            &payload.first_name,
            &payload.last_name,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// ---
// Payload: Login
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "The authenticated user's profile")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    Json(user)
}
