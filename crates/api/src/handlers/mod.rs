//! Request handlers.
//!
//! Each submodule covers one resource. Handlers authenticate via the
//! extractors in `middleware::auth`, validate the posted form, delegate to
//! the matching repository in `cinelog_db`, and answer with a redirect or a
//! rendered page.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod reviews;
