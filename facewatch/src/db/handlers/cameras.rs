//! Database repository for cameras. All operations are ownership-scoped.

use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::{
        errors::Result,
        models::cameras::{CameraCreateDBRequest, CameraDBResponse, CameraUpdateDBRequest},
    },
    types::{CameraId, UserId, abbrev_uuid},
};

pub struct Cameras<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Cameras<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a camera for its owner. Status defaults to `inactive` (schema default).
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), camera_name = %request.camera_name), err)]
    pub async fn create(&mut self, request: &CameraCreateDBRequest) -> Result<CameraDBResponse> {
        let camera = sqlx::query_as::<_, CameraDBResponse>(
            r#"
            INSERT INTO cameras (id, user_id, camera_name, camera_brand, camera_type, ip_address, port, username, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.camera_name)
        .bind(&request.camera_brand)
        .bind(request.camera_type)
        .bind(&request.ip_address)
        .bind(request.port)
        .bind(&request.username)
        .bind(&request.password_hash)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(camera)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list_for_user(&mut self, user_id: UserId) -> Result<Vec<CameraDBResponse>> {
        let cameras = sqlx::query_as::<_, CameraDBResponse>("SELECT * FROM cameras WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(cameras)
    }

    /// Fetch a camera only if it belongs to the given user.
    #[instrument(skip(self), fields(camera_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_owned(&mut self, id: CameraId, user_id: UserId) -> Result<Option<CameraDBResponse>> {
        let camera = sqlx::query_as::<_, CameraDBResponse>("SELECT * FROM cameras WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(camera)
    }

    /// Partial-merge update scoped to the owner. Absent fields keep their
    /// current value. Returns `None` when the camera does not exist for this
    /// user.
    #[instrument(skip(self, request), fields(camera_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn update_owned(&mut self, id: CameraId, user_id: UserId, request: &CameraUpdateDBRequest) -> Result<Option<CameraDBResponse>> {
        let camera = sqlx::query_as::<_, CameraDBResponse>(
            r#"
            UPDATE cameras SET
                camera_name = COALESCE($3, camera_name),
                camera_brand = COALESCE($4, camera_brand),
                camera_type = COALESCE($5, camera_type),
                ip_address = COALESCE($6, ip_address),
                port = COALESCE($7, port),
                username = COALESCE($8, username),
                password_hash = COALESCE($9, password_hash),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&request.camera_name)
        .bind(&request.camera_brand)
        .bind(request.camera_type)
        .bind(&request.ip_address)
        .bind(request.port)
        .bind(&request.username)
        .bind(&request.password_hash)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(camera)
    }

    /// Delete a camera if it belongs to the given user. Detection logs cascade.
    #[instrument(skip(self), fields(camera_id = %abbrev_uuid(&id), user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn delete_owned(&mut self, id: CameraId, user_id: UserId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cameras WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of cameras the user currently owns (quota basis).
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn count_for_user(&mut self, user_id: UserId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cameras WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(count)
    }
}
