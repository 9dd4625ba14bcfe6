//! Shared domain types and errors for the cinelog workspace.

pub mod error;
pub mod types;
