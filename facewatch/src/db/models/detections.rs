//! Database models for detection logs.

use crate::api::models::cameras::CameraType;
use crate::types::{CameraId, DetectionLogId, FaceId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database response for a detection log entry, enriched with display fields
/// from the owning camera and the (optionally) matched face.
#[derive(Debug, Clone, FromRow)]
pub struct DetectionLogDBResponse {
    pub id: DetectionLogId,
    pub camera_id: CameraId,
    pub registered_face_id: Option<FaceId>,
    pub detection_confidence: Option<Decimal>,
    pub detection_image_path: Option<String>,
    pub detected_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    // Camera summary (inner join: the log cascades away with its camera)
    pub camera_name: String,
    pub camera_brand: Option<String>,
    pub camera_type: CameraType,
    // Face summary (left join: the reference is nulled when the face is deleted)
    pub face_name: Option<String>,
    pub face_image_path: Option<String>,
}
