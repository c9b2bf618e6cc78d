//! Database repository for the session ledger.
//!
//! Every issued bearer token gets a row here. Verification requires the row
//! to exist and be unexpired, which makes the ledger the revocation point:
//! deleting a row invalidates the token even though its signature is still
//! good.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::sessions::{SessionCreateDBRequest, SessionDBResponse},
};

pub struct Sessions<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Sessions<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Record an issued token with its expiry instant.
    #[instrument(skip(self, request), fields(user_id = %crate::types::abbrev_uuid(&request.user_id)), err)]
    pub async fn create(&mut self, request: &SessionCreateDBRequest) -> Result<SessionDBResponse> {
        let session = sqlx::query_as::<_, SessionDBResponse>(
            r#"
            INSERT INTO user_sessions (user_id, session_token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.session_token)
        .bind(request.expires_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(session)
    }

    /// Find a ledger row for this token that has not yet expired.
    #[instrument(skip(self, token), err)]
    pub async fn find_active(&mut self, token: &str) -> Result<Option<SessionDBResponse>> {
        let session =
            sqlx::query_as::<_, SessionDBResponse>("SELECT * FROM user_sessions WHERE session_token = $1 AND expires_at > NOW()")
                .bind(token)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(session)
    }

    /// Remove the ledger row for a token, revoking it immediately.
    #[instrument(skip(self, token), err)]
    pub async fn revoke(&mut self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE session_token = $1")
            .bind(token)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all expired ledger rows. Called opportunistically at login.
    #[instrument(skip(self), err)]
    pub async fn purge_expired(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= NOW()")
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
