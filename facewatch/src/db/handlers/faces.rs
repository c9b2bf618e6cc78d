//! Database repository for registered faces. All operations are ownership-scoped.

use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::{
        errors::Result,
        models::faces::{FaceCreateDBRequest, FaceDBResponse},
    },
    types::{FaceId, UserId, abbrev_uuid},
};

pub struct Faces<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Faces<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), face_name = %request.face_name), err)]
    pub async fn create(&mut self, request: &FaceCreateDBRequest) -> Result<FaceDBResponse> {
        let face = sqlx::query_as::<_, FaceDBResponse>(
            r#"
            INSERT INTO registered_faces (id, user_id, face_name, face_image_path)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.face_name)
        .bind(&request.face_image_path)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(face)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_for_user(&mut self, user_id: UserId) -> Result<Vec<FaceDBResponse>> {
        let faces = sqlx::query_as::<_, FaceDBResponse>("SELECT * FROM registered_faces WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(faces)
    }

    /// Fetch a face only if it belongs to the given user.
    #[instrument(skip(self), fields(face_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_owned(&mut self, id: FaceId, user_id: UserId) -> Result<Option<FaceDBResponse>> {
        let face = sqlx::query_as::<_, FaceDBResponse>("SELECT * FROM registered_faces WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(face)
    }

    /// Delete a face if it belongs to the given user. Detection logs keep
    /// their rows; their `registered_face_id` is nulled by the schema.
    #[instrument(skip(self), fields(face_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn delete_owned(&mut self, id: FaceId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM registered_faces WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of faces the user currently owns (quota basis).
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn count_for_user(&mut self, user_id: UserId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registered_faces WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }

    /// Number of active faces, for dashboard stats.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn count_active_for_user(&mut self, user_id: UserId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registered_faces WHERE user_id = $1 AND is_active = TRUE")
            .bind(user_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}
