//! Database models for the session ledger.

use crate::types::{SessionId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for recording an issued token
#[derive(Debug, Clone)]
pub struct SessionCreateDBRequest {
    pub user_id: UserId,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Database response for a session ledger row
#[derive(Debug, Clone, FromRow)]
pub struct SessionDBResponse {
    pub id: SessionId,
    pub user_id: UserId,
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
