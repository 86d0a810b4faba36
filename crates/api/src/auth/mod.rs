//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`bootstrap`] -- first admin account from configuration.

pub mod bootstrap;
pub mod jwt;
pub mod password;
