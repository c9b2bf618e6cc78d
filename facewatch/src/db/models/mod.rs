//! Database record models matching table schemas.
//!
//! Each module holds the `FromRow` response struct for its table plus the
//! create/update request structs the repositories accept. These are distinct
//! from the API models in [`crate::api::models`], which shape the HTTP
//! contract and never expose secrets such as password hashes.

pub mod cameras;
pub mod detections;
pub mod faces;
pub mod packages;
pub mod sessions;
pub mod users;
