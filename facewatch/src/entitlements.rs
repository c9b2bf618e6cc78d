//! Package entitlement resolution and quota enforcement.
//!
//! A user's package grants numeric quotas for cameras and registered faces.
//! `-1` (or an absent limit, including users without a package) means
//! unlimited. [`ensure_capacity`] is the only gate through which resource
//! creation may pass, and it must run inside the same transaction as the
//! insert: it takes a `FOR UPDATE` lock on the owning user row first, so two
//! concurrent creates for the same user serialize and cannot both pass the
//! count check below the limit.

use sqlx::{FromRow, PgConnection};
use tracing::instrument;

use crate::{
    db::handlers::{Cameras, Faces},
    errors::Error,
    types::{UserId, abbrev_uuid},
};

/// Sentinel limit value meaning "no limit".
pub const UNLIMITED: i32 = -1;

/// The resolved numeric limits derived from a user's package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlements {
    pub camera_limit: Option<i32>,
    pub face_limit: Option<i32>,
}

impl Entitlements {
    pub fn limit_for(&self, kind: ResourceKind) -> Option<i32> {
        match kind {
            ResourceKind::Camera => self.camera_limit,
            ResourceKind::Face => self.face_limit,
        }
    }

    /// Whether a user currently holding `current` resources may create one more
    /// under `limit`.
    pub fn allows(limit: Option<i32>, current: i64) -> bool {
        match limit {
            None => true,
            Some(UNLIMITED) => true,
            Some(n) => current < i64::from(n),
        }
    }
}

/// The quota-limited resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Camera,
    Face,
}

impl ResourceKind {
    fn noun(self) -> &'static str {
        match self {
            ResourceKind::Camera => "cameras",
            ResourceKind::Face => "faces",
        }
    }
}

#[derive(Debug, FromRow)]
struct LimitRow {
    camera_limit: Option<i32>,
    max_registered_faces: Option<i32>,
}

impl From<LimitRow> for Entitlements {
    fn from(row: LimitRow) -> Self {
        Self {
            camera_limit: row.camera_limit,
            face_limit: row.max_registered_faces,
        }
    }
}

const RESOLVE_SQL: &str = r#"
    SELECT p.camera_limit, p.max_registered_faces
    FROM users u
    LEFT JOIN packages p ON p.id = u.package_id
    WHERE u.id = $1
"#;

async fn fetch_limits(conn: &mut PgConnection, user_id: UserId, lock_user_row: bool) -> Result<Entitlements, Error> {
    let sql = if lock_user_row {
        format!("{RESOLVE_SQL} FOR UPDATE OF u")
    } else {
        RESOLVE_SQL.to_string()
    };

    let row = sqlx::query_as::<_, LimitRow>(&sql)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(crate::db::errors::DbError::from)?
        .ok_or_else(|| Error::NotFound {
            resource: "user",
            id: user_id.to_string(),
        })?;

    Ok(Entitlements::from(row))
}

/// Resolve the user's entitlements from their package. Users without a
/// package resolve to unlimited.
#[instrument(skip(conn), fields(user_id = %abbrev_uuid(&user_id)), err)]
pub async fn resolve(conn: &mut PgConnection, user_id: UserId) -> Result<Entitlements, Error> {
    fetch_limits(conn, user_id, false).await
}

/// Verify the user may create one more resource of `kind`, or fail with
/// `QuotaExceeded` naming the limit. Must be called inside the transaction
/// that performs the insert.
#[instrument(skip(conn), fields(user_id = %abbrev_uuid(&user_id), kind = ?kind), err)]
pub async fn ensure_capacity(conn: &mut PgConnection, user_id: UserId, kind: ResourceKind) -> Result<(), Error> {
    let entitlements = fetch_limits(&mut *conn, user_id, true).await?;
    let limit = entitlements.limit_for(kind);

    // Skip the count entirely for unlimited users
    if matches!(limit, None | Some(UNLIMITED)) {
        return Ok(());
    }

    let current = match kind {
        ResourceKind::Camera => Cameras::new(&mut *conn).count_for_user(user_id).await?,
        ResourceKind::Face => Faces::new(&mut *conn).count_for_user(user_id).await?,
    };

    if !Entitlements::allows(limit, current) {
        return Err(Error::QuotaExceeded {
            resource: kind.noun(),
            limit: limit.unwrap_or(UNLIMITED),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_unlimited() {
        assert!(Entitlements::allows(None, 0));
        assert!(Entitlements::allows(None, 10_000));
        assert!(Entitlements::allows(Some(UNLIMITED), 10_000));
    }

    #[test]
    fn test_allows_under_limit() {
        assert!(Entitlements::allows(Some(5), 0));
        assert!(Entitlements::allows(Some(5), 4));
    }

    #[test]
    fn test_denies_at_and_over_limit() {
        assert!(!Entitlements::allows(Some(5), 5));
        assert!(!Entitlements::allows(Some(5), 6));
        assert!(!Entitlements::allows(Some(0), 0));
    }

    #[test]
    fn test_limit_for_kind() {
        let entitlements = Entitlements {
            camera_limit: Some(1),
            face_limit: Some(10),
        };
        assert_eq!(entitlements.limit_for(ResourceKind::Camera), Some(1));
        assert_eq!(entitlements.limit_for(ResourceKind::Face), Some(10));
    }
}
