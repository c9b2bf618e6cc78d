//! API response models for registered faces.

use crate::db::models::faces::FaceDBResponse;
use crate::types::FaceId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Registered face as returned by the faces endpoints. The raw encoding is
/// internal to the recognition pipeline and never serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FaceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: FaceId,
    pub face_name: String,
    pub face_image_path: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FaceDBResponse> for FaceResponse {
    fn from(db: FaceDBResponse) -> Self {
        Self {
            id: db.id,
            face_name: db.face_name,
            face_image_path: db.face_image_path,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
