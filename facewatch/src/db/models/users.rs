//! Database models for users.

use crate::types::{PackageId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub package_id: Option<PackageId>,
}

/// Database response for a user row
#[derive(Debug, Clone, FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub package_id: Option<PackageId>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
