//! Extractor for the authenticated user.
//!
//! Verification is layered and fails closed at every step:
//!
//! 1. The `Authorization: Bearer <token>` header must be present and well-formed
//! 2. The JWT signature and expiry claim must check out
//! 3. The session ledger must hold a live (unexpired) row for the token —
//!    a well-signed token that was revoked or purged is rejected
//! 4. The user must still exist and be active
//!
//! All failures surface as 401 with a generic message.

use axum::http::HeaderMap;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    db::handlers::{Sessions, Users},
    errors::{Error, Result},
};

/// Pull the bearer token out of the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = bearer_token(&parts.headers).ok_or(Error::Unauthenticated { message: None })?;

        // Signature and expiry claim first; cheap and CPU-only
        let claims = session::verify_session_token(token, &state.config)?;
        trace!("Token signature verified for user {}", claims.sub);

        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

        // The ledger is the revocation point: no live row, no access
        let mut sessions = Sessions::new(&mut conn);
        if sessions.find_active(token).await?.is_none() {
            trace!("Token is well-signed but absent from or expired in the session ledger");
            return Err(Error::Unauthenticated { message: None });
        }

        let mut users = Users::new(&mut conn);
        let user = users.get_by_id(claims.sub).await?.ok_or(Error::Unauthenticated { message: None })?;

        if !user.is_active {
            trace!("User {} is deactivated", claims.sub);
            return Err(Error::Unauthenticated { message: None });
        }

        debug!("Authenticated user: {}", user.id);
        Ok(CurrentUser::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("bearer lowercase-scheme"));
        assert_eq!(bearer_token(&headers), None);
    }
}
