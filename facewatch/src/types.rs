//! Common type definitions shared across the crate.
//!
//! All entity IDs are UUIDs wrapped in type aliases:
//!
//! - [`UserId`]: User account identifier
//! - [`PackageId`]: Subscription package identifier
//! - [`SessionId`]: Session ledger row identifier
//! - [`CameraId`]: Camera identifier
//! - [`FaceId`]: Registered face identifier
//! - [`DetectionLogId`]: Detection log entry identifier

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type PackageId = Uuid;
pub type SessionId = Uuid;
pub type CameraId = Uuid;
pub type FaceId = Uuid;
pub type DetectionLogId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
