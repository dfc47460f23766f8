//! Account roles governing route access.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to a profile.
///
/// A profile without a resolvable role (missing row, lookup failure,
/// unknown string) is modeled as `Option<Role>::None` by callers and is
/// treated as least privilege everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Business,
    Worker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Business => "business",
            Role::Worker => "worker",
        }
    }

    /// Canonical home path the role is redirected to when it lands
    /// somewhere it does not belong.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Editor => "/admin",
            Role::Business => "/business/home",
            Role::Worker => "/worker/home",
        }
    }

    /// Returns true if this role may manage site content and settings.
    pub fn can_manage_site(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Returns true if this role may author and publish blog posts.
    pub fn can_manage_blog(&self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "business" => Ok(Role::Business),
            "worker" => Ok(Role::Worker),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Editor.as_str(), "editor");
        assert_eq!(Role::Business.as_str(), "business");
        assert_eq!(Role::Worker.as_str(), "worker");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("EDITOR").unwrap(), Role::Editor);
        assert_eq!(Role::from_str("Business").unwrap(), Role::Business);
        assert_eq!(Role::from_str("worker").unwrap(), Role::Worker);
        assert!(Role::from_str("superuser").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(format!("{}", Role::Admin), "admin");
        assert_eq!(format!("{}", Role::Worker), "worker");
    }

    #[test]
    fn test_home_paths() {
        assert_eq!(Role::Admin.home_path(), "/admin");
        assert_eq!(Role::Editor.home_path(), "/admin");
        assert_eq!(Role::Business.home_path(), "/business/home");
        assert_eq!(Role::Worker.home_path(), "/worker/home");
    }

    #[test]
    fn test_capabilities() {
        assert!(Role::Admin.can_manage_site());
        assert!(!Role::Editor.can_manage_site());
        assert!(Role::Admin.can_manage_blog());
        assert!(Role::Editor.can_manage_blog());
        assert!(!Role::Business.can_manage_blog());
        assert!(!Role::Worker.can_manage_blog());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Business).unwrap(), "\"business\"");
        let role: Role = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(role, Role::Editor);
    }
}
