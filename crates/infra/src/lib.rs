//! Infrastructure layer: persistence adapters, application services, config.

pub mod cart_service;
pub mod config;
pub mod dto;
pub mod error;
pub mod member_service;
pub mod product_service;
pub mod store;

pub use cart_service::CartService;
pub use error::ServiceError;
pub use member_service::MemberService;
pub use product_service::ProductService;
