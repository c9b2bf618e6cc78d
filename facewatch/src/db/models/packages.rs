//! Database models for subscription packages.

use crate::types::PackageId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::types::Json;

/// Database response for a package row.
///
/// `camera_limit` / `max_registered_faces` of `-1` (or NULL) mean unlimited.
#[derive(Debug, Clone, FromRow)]
pub struct PackageDBResponse {
    pub id: PackageId,
    pub name: String,
    pub price: Decimal,
    pub period: String,
    pub description: Option<String>,
    pub features: Option<Json<Vec<String>>>,
    pub camera_limit: Option<i32>,
    pub max_registered_faces: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
