//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token issuing and verification.
//! - [`credentials`] -- registration and login against a credential store.

pub mod credentials;
pub mod jwt;
pub mod password;
