//! Database models for cameras.

use crate::api::models::cameras::{CameraStatus, CameraType};
use crate::types::{CameraId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new camera
#[derive(Debug, Clone)]
pub struct CameraCreateDBRequest {
    pub user_id: UserId,
    pub camera_name: String,
    pub camera_brand: Option<String>,
    pub camera_type: CameraType,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

/// Database request for partially updating a camera.
///
/// `None` leaves the column untouched; only present fields are merged.
#[derive(Debug, Clone, Default)]
pub struct CameraUpdateDBRequest {
    pub camera_name: Option<String>,
    pub camera_brand: Option<String>,
    pub camera_type: Option<CameraType>,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub status: Option<CameraStatus>,
}

/// Database response for a camera row
#[derive(Debug, Clone, FromRow)]
pub struct CameraDBResponse {
    pub id: CameraId,
    pub user_id: UserId,
    pub camera_name: String,
    pub camera_brand: Option<String>,
    pub camera_type: CameraType,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub status: CameraStatus,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
