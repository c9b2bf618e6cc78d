//! Repository implementations for database access.
//!
//! Each repository wraps a `&mut PgConnection`, provides strongly-typed
//! operations for one table, and reports failures through
//! [`crate::db::errors::DbError`]. Camera, face, and detection repositories
//! are ownership-scoped: every single-row read or write filters on
//! `id AND user_id`, so a foreign id behaves exactly like a missing one.

pub mod cameras;
pub mod detections;
pub mod faces;
pub mod packages;
pub mod sessions;
pub mod users;

pub use cameras::Cameras;
pub use detections::Detections;
pub use faces::Faces;
pub use packages::Packages;
pub use sessions::Sessions;
pub use users::Users;
