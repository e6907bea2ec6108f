pub mod auth;
pub mod applications;
pub mod companies;
pub mod products;
pub mod stock;
pub mod orders;
