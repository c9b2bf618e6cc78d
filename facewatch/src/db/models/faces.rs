//! Database models for registered faces.

use crate::types::{FaceId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for registering a face
#[derive(Debug, Clone)]
pub struct FaceCreateDBRequest {
    pub user_id: UserId,
    pub face_name: String,
    pub face_image_path: Option<String>,
}

/// Database response for a registered face row.
///
/// `face_encoding` stays empty until the recognition pipeline populates it.
#[derive(Debug, Clone, FromRow)]
pub struct FaceDBResponse {
    pub id: FaceId,
    pub user_id: UserId,
    pub face_name: String,
    pub face_image_path: Option<String>,
    pub face_encoding: Option<Vec<u8>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
