//! Authentication module
//!
//! Provides JWT-based authentication with bcrypt password hashing and
//! role-gated request extractors.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtKeys, JwtService, TokenError, TokenIdentity};
pub use middleware::{AdminUser, AuthUser};
pub use password::PasswordService;
