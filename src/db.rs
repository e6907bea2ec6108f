pub mod user_repo;
pub use user_repo::UserRepository;
pub mod application_repo;
pub use application_repo::ApplicationRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
