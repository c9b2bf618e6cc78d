//! API request and response data models.
//!
//! All models are annotated with `utoipa` for the OpenAPI document served at
//! `/docs`. Validation lives on the request structs themselves so every
//! handler path shares one set of rules.

pub mod auth;
pub mod cameras;
pub mod dashboard;
pub mod detections;
pub mod faces;
pub mod packages;
pub mod pagination;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Minimal confirmation body for delete/logout style endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
