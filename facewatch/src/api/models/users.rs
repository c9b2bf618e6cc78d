//! API request/response models for users.

use crate::api::models::packages::PackageResponse;
use crate::db::models::users::UserDBResponse;
use crate::types::{PackageId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User profile as returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub package_id: Option<PackageId>,
    /// Subscribed package details (included when resolved)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageResponse>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            email: db.email,
            full_name: db.full_name,
            phone_number: db.phone_number,
            package_id: db.package_id,
            package: None, // Attached separately when the caller wants it
            is_active: db.is_active,
            is_verified: db.is_verified,
            created_at: db.created_at,
        }
    }
}

impl UserResponse {
    /// Attach the resolved package details
    pub fn with_package(mut self, package: Option<PackageResponse>) -> Self {
        self.package = package;
        self
    }
}

/// The authenticated principal, extracted from a verified bearer token and a
/// live session-ledger row.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub package_id: Option<PackageId>,
}

impl From<UserDBResponse> for CurrentUser {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            email: db.email,
            full_name: db.full_name,
            package_id: db.package_id,
        }
    }
}
