//! HTTP request handlers for all API endpoints.
//!
//! Handlers validate input, enforce authentication through the
//! [`crate::api::models::users::CurrentUser`] extractor, run business logic
//! against the database repositories (inside a transaction whenever a quota
//! check and an insert must be atomic), and serialize responses.
//!
//! - [`auth`]: registration, login, logout, current-user profile
//! - [`cameras`]: camera CRUD and the (stubbed) connection test
//! - [`dashboard`]: daily stats counters
//! - [`detections`]: paginated detection-log retrieval
//! - [`faces`]: face registration with image upload, listing, deletion
//! - [`packages`]: public package tier listing

pub mod auth;
pub mod cameras;
pub mod dashboard;
pub mod detections;
pub mod faces;
pub mod packages;
