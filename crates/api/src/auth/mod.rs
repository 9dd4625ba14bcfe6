//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- opaque session-token generation and digest helpers.

pub mod password;
pub mod session;
