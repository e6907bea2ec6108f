// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::signup,
        handlers::auth::register_admin,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Applications ---
        handlers::applications::list_applications,
        handlers::applications::get_application,
        handlers::applications::approve_application,
        handlers::applications::reject_application,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::get_company,
        handlers::companies::deactivate_company,
        handlers::companies::reactivate_company,

        // --- Catalog ---
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::list_products,
        handlers::products::get_product,

        // --- Inventory ---
        handlers::stock::receive_stock,
        handlers::stock::list_inventory,
        handlers::stock::get_inventory,

        // --- Orders ---
        handlers::orders::place_order,
        handlers::orders::list_my_orders,
        handlers::orders::list_orders,
        handlers::orders::update_order_status,
        handlers::orders::cancel_order,
        handlers::orders::get_order_document,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::AuthResponse,
            handlers::auth::SignupPayload,
            handlers::auth::RegisterAdminPayload,
            handlers::auth::LoginPayload,

            // --- Applications ---
            models::application::ApplicationStatus,
            models::application::CompanyType,
            models::application::Address,
            models::application::ContactPerson,
            models::application::CompanyApplication,
            handlers::applications::RejectApplicationPayload,

            // --- Companies ---
            models::company::ShippingAddress,
            models::company::Company,

            // --- Catalog ---
            models::product::ProductStructure,
            models::product::ProductStatus,
            models::product::PackType,
            models::product::Dimensions,
            models::product::PackContentLine,
            models::product::Fpakk,
            models::product::Mellompakk,
            models::product::Toppakk,
            models::product::Product,
            handlers::products::ProductPayload,

            // --- Inventory ---
            models::inventory::PackagingLevel,
            models::inventory::Inventory,
            models::inventory::InventoryView,
            handlers::stock::StockReceptionPayload,
            handlers::stock::StockReceptionResponse,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::OrderItem,
            models::order::Order,
            handlers::orders::OrderLinePayload,
            handlers::orders::PlaceOrderPayload,
            handlers::orders::UpdateOrderStatusPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Signup and login"),
        (name = "Users", description = "User profile"),
        (name = "Applications", description = "Company application review"),
        (name = "Companies", description = "B2B customer management"),
        (name = "Catalog", description = "Products and packaging"),
        (name = "Inventory", description = "Stock levels and receptions"),
        (name = "Orders", description = "Order placement and fulfilment")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
