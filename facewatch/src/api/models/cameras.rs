//! API request/response models for cameras, plus the canonical camera
//! validation shared by the create and update paths.

use crate::db::models::cameras::CameraDBResponse;
use crate::errors::Error;
use crate::types::CameraId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of camera a user can register.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "camera_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CameraType {
    IpCamera,
    Webcam,
}

/// Lifecycle status of a camera. New cameras start `inactive`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "camera_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CameraStatus {
    Active,
    Inactive,
    Disabled,
}

/// Request body for registering a camera.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CameraCreate {
    pub camera_name: String,
    pub camera_brand: Option<String>,
    pub camera_type: CameraType,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    /// Hashed before storage; never returned
    pub password: Option<String>,
}

impl CameraCreate {
    pub fn validate(&self) -> Result<(), Error> {
        if self.camera_name.trim().is_empty() {
            return Err(Error::Validation {
                field: "camera_name",
                message: "camera name cannot be empty".to_string(),
            });
        }
        validate_endpoint(self.camera_type, self.ip_address.as_deref(), self.port)
    }
}

/// Request body for partially updating a camera. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CameraUpdate {
    pub camera_name: Option<String>,
    pub camera_brand: Option<String>,
    pub camera_type: Option<CameraType>,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    /// Re-hashed before storage when present
    pub password: Option<String>,
    pub status: Option<CameraStatus>,
}

impl CameraUpdate {
    /// Validate the state the camera would end up in after the merge, so an
    /// update can never strip an ip_camera of its address or port.
    pub fn validate_against(&self, current: &CameraDBResponse) -> Result<(), Error> {
        if let Some(name) = &self.camera_name {
            if name.trim().is_empty() {
                return Err(Error::Validation {
                    field: "camera_name",
                    message: "camera name cannot be empty".to_string(),
                });
            }
        }

        let effective_type = self.camera_type.unwrap_or(current.camera_type);
        let effective_ip = self.ip_address.as_deref().or(current.ip_address.as_deref());
        let effective_port = self.port.or(current.port);

        validate_endpoint(effective_type, effective_ip, effective_port)
    }
}

/// The one place camera endpoint rules live: port range, address syntax, and
/// the ip_camera completeness requirement.
pub fn validate_endpoint(camera_type: CameraType, ip_address: Option<&str>, port: Option<i32>) -> Result<(), Error> {
    if let Some(port) = port {
        if !(1..=65535).contains(&port) {
            return Err(Error::Validation {
                field: "port",
                message: "port must be between 1 and 65535".to_string(),
            });
        }
    }

    if let Some(ip) = ip_address {
        if ip.parse::<std::net::IpAddr>().is_err() {
            return Err(Error::Validation {
                field: "ip_address",
                message: "not a valid IP address".to_string(),
            });
        }
    }

    if camera_type == CameraType::IpCamera && (ip_address.is_none() || port.is_none()) {
        return Err(Error::Validation {
            field: "camera_type",
            message: "ip_camera requires ip_address and port".to_string(),
        });
    }

    Ok(())
}

/// Camera response. Credentials are write-only: the password hash never
/// leaves the database layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CameraResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CameraId,
    pub camera_name: String,
    pub camera_brand: Option<String>,
    pub camera_type: CameraType,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub status: CameraStatus,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CameraDBResponse> for CameraResponse {
    fn from(db: CameraDBResponse) -> Self {
        Self {
            id: db.id,
            camera_name: db.camera_name,
            camera_brand: db.camera_brand,
            camera_type: db.camera_type,
            ip_address: db.ip_address,
            port: db.port,
            username: db.username,
            status: db.status,
            last_seen: db.last_seen,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Result of a camera connection test.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CameraTestResponse {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip_camera_create() -> CameraCreate {
        CameraCreate {
            camera_name: "Front door".to_string(),
            camera_brand: Some("Hikvision".to_string()),
            camera_type: CameraType::IpCamera,
            ip_address: Some("192.168.1.20".to_string()),
            port: Some(554),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[test]
    fn test_ip_camera_requires_address_and_port() {
        let mut create = ip_camera_create();
        assert!(create.validate().is_ok());

        create.ip_address = None;
        assert!(create.validate().is_err());

        create.ip_address = Some("192.168.1.20".to_string());
        create.port = None;
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_webcam_needs_no_endpoint() {
        let create = CameraCreate {
            camera_name: "Laptop cam".to_string(),
            camera_brand: None,
            camera_type: CameraType::Webcam,
            ip_address: None,
            port: None,
            username: None,
            password: None,
        };
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_port_bounds() {
        assert!(validate_endpoint(CameraType::Webcam, None, Some(0)).is_err());
        assert!(validate_endpoint(CameraType::Webcam, None, Some(65536)).is_err());
        assert!(validate_endpoint(CameraType::Webcam, None, Some(1)).is_ok());
        assert!(validate_endpoint(CameraType::Webcam, None, Some(65535)).is_ok());
    }

    #[test]
    fn test_ip_address_syntax() {
        assert!(validate_endpoint(CameraType::Webcam, Some("not-an-ip"), None).is_err());
        assert!(validate_endpoint(CameraType::Webcam, Some("10.0.0.1"), None).is_ok());
        assert!(validate_endpoint(CameraType::Webcam, Some("::1"), None).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut create = ip_camera_create();
        create.camera_name = "   ".to_string();
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_update_cannot_strip_ip_camera_endpoint() {
        let current = CameraDBResponse {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            camera_name: "Front door".to_string(),
            camera_brand: None,
            camera_type: CameraType::Webcam,
            ip_address: None,
            port: None,
            username: None,
            password_hash: None,
            status: CameraStatus::Inactive,
            last_seen: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // Switching a webcam to ip_camera without supplying an endpoint fails
        let update = CameraUpdate {
            camera_type: Some(CameraType::IpCamera),
            ..Default::default()
        };
        assert!(update.validate_against(&current).is_err());

        // Supplying the endpoint in the same update passes
        let update = CameraUpdate {
            camera_type: Some(CameraType::IpCamera),
            ip_address: Some("10.0.0.4".to_string()),
            port: Some(554),
            ..Default::default()
        };
        assert!(update.validate_against(&current).is_ok());
    }

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_string(&CameraType::IpCamera).unwrap(), "\"ip_camera\"");
        assert_eq!(serde_json::from_str::<CameraType>("\"webcam\"").unwrap(), CameraType::Webcam);
        assert_eq!(serde_json::to_string(&CameraStatus::Inactive).unwrap(), "\"inactive\"");
        assert!(serde_json::from_str::<CameraType>("\"drone\"").is_err());
        assert!(serde_json::from_str::<CameraStatus>("\"paused\"").is_err());
    }
}
