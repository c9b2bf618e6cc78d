//! API request/response models for authentication.

use crate::config::PasswordConfig;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for account registration.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub confirm_password: String,
    /// Package tier to subscribe to; matched case-insensitively, falling back
    /// to "Standard" when absent or unknown.
    pub selected_package: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self, password_config: &PasswordConfig) -> Result<(), Error> {
        if !is_valid_email(&self.email) {
            return Err(Error::Validation {
                field: "email",
                message: "not a valid email address".to_string(),
            });
        }

        if self.full_name.trim().is_empty() {
            return Err(Error::Validation {
                field: "full_name",
                message: "full name cannot be empty".to_string(),
            });
        }

        if self.password.len() < password_config.min_length {
            return Err(Error::Validation {
                field: "password",
                message: format!("password must be at least {} characters", password_config.min_length),
            });
        }

        if self.password.len() > password_config.max_length {
            return Err(Error::Validation {
                field: "password",
                message: format!("password must be no more than {} characters", password_config.max_length),
            });
        }

        if self.password != self.confirm_password {
            return Err(Error::Validation {
                field: "confirm_password",
                message: "passwords do not match".to_string(),
            });
        }

        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued on successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Shallow email shape check: one '@', non-empty local part, dotted domain.
/// Deliverability is not our problem here; obvious garbage is.
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "user@example.com".to_string(),
            full_name: "Test User".to_string(),
            phone_number: None,
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            selected_package: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate(&PasswordConfig::default()).is_ok());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut req = request();
        req.confirm_password = "different".to_string();
        let err = req.validate(&PasswordConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "confirm_password", .. }));
    }

    #[test]
    fn test_password_length_bounds() {
        let config = PasswordConfig::default();

        let mut req = request();
        req.password = "short".to_string();
        req.confirm_password = "short".to_string();
        assert!(req.validate(&config).is_err());

        let long = "x".repeat(config.max_length + 1);
        req.password = long.clone();
        req.confirm_password = long;
        assert!(req.validate(&config).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user.name+tag@sub.domain.co.uk"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
    }
}
