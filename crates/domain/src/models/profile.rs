//! Profile domain models.
//!
//! One profile exists per authenticated identity; its role drives every
//! authorization decision in the route guard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::role::Role;

/// An authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    /// Where the client should navigate after login.
    pub redirect_to: String,
}

/// Public view of the current profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub display_name: String,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
            display_name: profile.display_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "tanaka@example.com".to_string(),
            role: Role::Business,
            display_name: "田中商事".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = LoginRequest {
            email: "user@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_profile_response_from_profile() {
        let profile = sample_profile();
        let response = ProfileResponse::from(&profile);
        assert_eq!(response.id, profile.id);
        assert_eq!(response.role, Role::Business);
        assert_eq!(response.display_name, "田中商事");
    }

    #[test]
    fn test_login_response_serialization() {
        let response = LoginResponse {
            token: "tok".to_string(),
            role: Role::Worker,
            redirect_to: "/worker/home".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"role\":\"worker\""));
        assert!(json.contains("\"redirectTo\":\"/worker/home\""));
    }
}
