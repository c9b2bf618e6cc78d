//! Database repository for detection log retrieval.
//!
//! Read-only: detection rows are produced by the recognition pipeline, which
//! is an external collaborator of this service.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::instrument;

use crate::{
    db::{errors::Result, models::detections::DetectionLogDBResponse},
    types::{UserId, abbrev_uuid},
};

pub struct Detections<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Detections<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List the user's detection logs, newest first, enriched with camera and
    /// face display fields. The caller clamps `limit` and `offset`.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), limit, offset), err)]
    pub async fn list_for_user(&mut self, user_id: UserId, limit: i64, offset: i64) -> Result<Vec<DetectionLogDBResponse>> {
        let detections = sqlx::query_as::<_, DetectionLogDBResponse>(
            r#"
            SELECT
                d.id, d.camera_id, d.registered_face_id,
                d.detection_confidence, d.detection_image_path,
                d.detected_at, d.created_at,
                c.camera_name, c.camera_brand, c.camera_type,
                f.face_name, f.face_image_path
            FROM detection_logs d
            JOIN cameras c ON c.id = d.camera_id
            LEFT JOIN registered_faces f ON f.id = d.registered_face_id
            WHERE d.user_id = $1
            ORDER BY d.detected_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(detections)
    }

    /// Count detections for the user since the given instant (dashboard).
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn count_since(&mut self, user_id: UserId, since: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM detection_logs WHERE user_id = $1 AND detected_at >= $2")
            .bind(user_id)
            .bind(since)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}
