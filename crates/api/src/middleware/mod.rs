//! Request extractors enforcing authentication and authorization.

pub mod auth;
