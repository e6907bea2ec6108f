pub mod auth;
pub mod application_service;
pub mod catalog_service;
pub mod company_service;
pub mod document_service;
pub mod inventory_service;
pub mod order_service;
pub mod packaging;
