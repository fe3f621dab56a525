//! # portfoliofy-auth
//!
//! Credential handling for Portfoliofy.
//!
//! ## Modules
//!
//! - `jwt` — HS256 bearer token creation and validation
//! - `password` — Argon2id hashing and registration password policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
