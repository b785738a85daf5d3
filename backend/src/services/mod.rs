//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod email;
pub mod order;
pub mod product;
pub mod stats;
pub mod user;

pub use email::EmailService;
pub use order::OrderService;
pub use product::{ProductService, UploadedImage};
pub use stats::StatsService;
pub use user::UserService;
