//! # REST API Components
//!
//! HTTP routing, validation middleware, and the product handlers.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
