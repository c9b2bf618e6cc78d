//! API response models for detection logs.

use crate::api::models::cameras::CameraType;
use crate::db::models::detections::DetectionLogDBResponse;
use crate::types::{CameraId, DetectionLogId, FaceId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Display fields of the camera that produced a detection.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CameraSummary {
    #[schema(value_type = String, format = "uuid")]
    pub id: CameraId,
    pub camera_name: String,
    pub camera_brand: Option<String>,
    pub camera_type: CameraType,
}

/// Display fields of the face matched in a detection.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FaceSummary {
    #[schema(value_type = String, format = "uuid")]
    pub id: FaceId,
    pub face_name: String,
    pub face_image_path: Option<String>,
}

/// One detection log entry, enriched with camera and face summaries.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DetectionLogResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: DetectionLogId,
    #[schema(value_type = String, format = "uuid")]
    pub camera_id: CameraId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub registered_face_id: Option<FaceId>,
    #[schema(value_type = Option<f64>)]
    pub detection_confidence: Option<Decimal>,
    pub detection_image_path: Option<String>,
    pub detected_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub camera: CameraSummary,
    /// Absent when the detection matched no registered face, or the face was
    /// since deleted (the reference is nulled, not cascaded).
    pub registered_face: Option<FaceSummary>,
}

impl From<DetectionLogDBResponse> for DetectionLogResponse {
    fn from(db: DetectionLogDBResponse) -> Self {
        let registered_face = match (db.registered_face_id, db.face_name) {
            (Some(id), Some(face_name)) => Some(FaceSummary {
                id,
                face_name,
                face_image_path: db.face_image_path,
            }),
            _ => None,
        };

        Self {
            id: db.id,
            camera_id: db.camera_id,
            registered_face_id: db.registered_face_id,
            detection_confidence: db.detection_confidence,
            detection_image_path: db.detection_image_path,
            detected_at: db.detected_at,
            created_at: db.created_at,
            camera: CameraSummary {
                id: db.camera_id,
                camera_name: db.camera_name,
                camera_brand: db.camera_brand,
                camera_type: db.camera_type,
            },
            registered_face,
        }
    }
}
