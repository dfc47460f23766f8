//! Profile database entity.

use chrono::{DateTime, Utc};
use domain::models::profile::Profile;
use domain::models::role::Role;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Profile row. The role column is free text in the database; rows with
/// an unknown role string resolve to no role (least privilege) rather
/// than failing the request.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileEntity {
    /// Parses the stored role string, treating unknown values as absent.
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_str(&self.role).ok()
    }

    /// Converts to the domain model; `None` when the stored role string
    /// is not a known role.
    pub fn into_domain(self) -> Option<Profile> {
        let role = self.parsed_role()?;
        Some(Profile {
            id: self.id,
            email: self.email,
            role,
            display_name: self.display_name,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(role: &str) -> ProfileEntity {
        ProfileEntity {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
            display_name: "User".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parsed_role_known() {
        assert_eq!(entity("business").parsed_role(), Some(Role::Business));
    }

    #[test]
    fn test_parsed_role_unknown_is_none() {
        assert_eq!(entity("superuser").parsed_role(), None);
        assert_eq!(entity("").parsed_role(), None);
    }

    #[test]
    fn test_into_domain_drops_unknown_role() {
        assert!(entity("nonsense").into_domain().is_none());
        let profile = entity("worker").into_domain().unwrap();
        assert_eq!(profile.role, Role::Worker);
    }
}
