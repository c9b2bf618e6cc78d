//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: axum route handlers for all endpoints
//! - **[`models`]**: request/response structures defining the public contract
//!
//! API models are deliberately distinct from the database models: responses
//! never carry password hashes or other secrets, and request structs own all
//! input validation so the same rules apply to create and update paths.

pub mod handlers;
pub mod models;
