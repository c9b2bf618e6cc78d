//! Database layer for data persistence and access.
//!
//! Built on SQLx with PostgreSQL, organized around the repository pattern:
//!
//! - [`handlers`]: repository implementations, one per entity
//! - [`models`]: database record structs and create/update request structs
//! - [`errors`]: classification of sqlx errors into recoverable categories
//!
//! Repositories borrow a `&mut PgConnection`, so the caller decides whether
//! an operation runs on a plain pool connection or inside a transaction.
//! Every multi-step mutation (quota check + insert, for instance) is expected
//! to run inside a transaction opened by the handler:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! entitlements::ensure_capacity(&mut tx, user_id, ResourceKind::Camera).await?;
//! let camera = Cameras::new(&mut tx).create(&request).await?;
//! tx.commit().await?;
//! ```
//!
//! Migrations live in `migrations/` and are embedded via [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
