//! Cinelog web application library.
//!
//! Exposes the building blocks (config, state, error handling, routes, auth,
//! page rendering) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod routes;
pub mod state;
