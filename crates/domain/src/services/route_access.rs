//! Route access decision table.
//!
//! A stateless per-request decision function: given the requester's role
//! (or lack of one) and the request path, produce either a pass-through or
//! a redirect target. Authorization is never an error here; every denied
//! request resolves to a redirect.
//!
//! The role is resolved fresh from the profile row on each request by the
//! middleware; a lookup failure arrives as `None` and is treated as least
//! privilege.

use crate::models::role::Role;

/// Path prefixes that require an authenticated identity.
pub const PROTECTED_PREFIXES: &[&str] = &["/admin", "/api/admin", "/business", "/worker"];

/// Prefixes forming the admin area. Editors get partial access here.
const ADMIN_PREFIXES: &[&str] = &["/admin", "/api/admin"];

/// Outcome of an access decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through unchanged.
    Allow,
    /// Send the client to this path instead.
    Redirect(String),
}

/// Returns true if the path lies under any auth-required prefix.
pub fn requires_auth(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| in_area(path, prefix))
}

/// Redirect target for an unauthenticated request to a protected path.
///
/// Carries the original path so the client can return after login.
pub fn login_redirect(path: &str) -> RouteDecision {
    RouteDecision::Redirect(format!("/login?redirectTo={}", path))
}

/// Decides access for an authenticated request.
///
/// `role` is `None` when the identity has no resolvable profile role.
pub fn authorize(role: Option<Role>, path: &str) -> RouteDecision {
    if !requires_auth(path) {
        return RouteDecision::Allow;
    }

    if let Some(rest) = admin_area_remainder(path) {
        return match role {
            Some(Role::Admin) => RouteDecision::Allow,
            Some(Role::Editor) => {
                // Editors may use the area root and the blog CMS only.
                if rest.is_empty() || rest == "/" || rest.starts_with("/blog") {
                    RouteDecision::Allow
                } else {
                    RouteDecision::Redirect("/admin".to_string())
                }
            }
            _ => RouteDecision::Redirect("/".to_string()),
        };
    }

    if in_area(path, "/business") {
        return match role {
            Some(Role::Business) => RouteDecision::Allow,
            other => RouteDecision::Redirect(home_for(other)),
        };
    }

    if in_area(path, "/worker") {
        return match role {
            Some(Role::Worker) => RouteDecision::Allow,
            other => RouteDecision::Redirect(home_for(other)),
        };
    }

    // Protected but not owned by a specific area: any authenticated
    // identity passes.
    RouteDecision::Allow
}

/// Canonical home for a (possibly absent) role.
fn home_for(role: Option<Role>) -> String {
    match role {
        Some(role) => role.home_path().to_string(),
        None => "/".to_string(),
    }
}

/// Returns the sub-path after an admin-area prefix, if the path is in the
/// admin area. `/admin` yields `""`, `/admin/blog/1` yields `/blog/1`.
fn admin_area_remainder(path: &str) -> Option<&str> {
    ADMIN_PREFIXES
        .iter()
        .find(|prefix| in_area(path, prefix))
        .map(|prefix| &path[prefix.len()..])
}

/// Prefix match on path-segment boundaries, so `/administrator` is not
/// inside `/admin`.
fn in_area(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow() -> RouteDecision {
        RouteDecision::Allow
    }

    fn redirect(target: &str) -> RouteDecision {
        RouteDecision::Redirect(target.to_string())
    }

    #[test]
    fn test_public_paths_skip_auth() {
        assert!(!requires_auth("/"));
        assert!(!requires_auth("/login"));
        assert!(!requires_auth("/api/translate"));
        assert!(!requires_auth("/blog/some-post"));
    }

    #[test]
    fn test_protected_prefixes_require_auth() {
        assert!(requires_auth("/admin"));
        assert!(requires_auth("/admin/settings"));
        assert!(requires_auth("/api/admin/content"));
        assert!(requires_auth("/business/home"));
        assert!(requires_auth("/worker/home"));
    }

    #[test]
    fn test_prefix_match_respects_segment_boundary() {
        assert!(!requires_auth("/administrator"));
        assert!(!requires_auth("/businessman"));
        assert!(!requires_auth("/workers-of-the-world"));
    }

    #[test]
    fn test_login_redirect_carries_original_path() {
        assert_eq!(
            login_redirect("/business/home"),
            redirect("/login?redirectTo=/business/home")
        );
    }

    #[test]
    fn test_public_path_allows_any_role() {
        assert_eq!(authorize(None, "/about"), allow());
        assert_eq!(authorize(Some(Role::Worker), "/about"), allow());
    }

    #[test]
    fn test_admin_passes_everywhere_in_admin_area() {
        assert_eq!(authorize(Some(Role::Admin), "/admin"), allow());
        assert_eq!(authorize(Some(Role::Admin), "/admin/settings"), allow());
        assert_eq!(authorize(Some(Role::Admin), "/api/admin/theme"), allow());
    }

    #[test]
    fn test_editor_allowed_admin_root_and_blog() {
        assert_eq!(authorize(Some(Role::Editor), "/admin"), allow());
        assert_eq!(authorize(Some(Role::Editor), "/admin/blog"), allow());
        assert_eq!(authorize(Some(Role::Editor), "/admin/blog/42/edit"), allow());
        assert_eq!(authorize(Some(Role::Editor), "/api/admin/blog"), allow());
    }

    #[test]
    fn test_editor_redirected_from_other_admin_paths() {
        assert_eq!(
            authorize(Some(Role::Editor), "/admin/settings"),
            redirect("/admin")
        );
        assert_eq!(
            authorize(Some(Role::Editor), "/api/admin/content"),
            redirect("/admin")
        );
    }

    #[test]
    fn test_non_staff_redirected_to_site_root_from_admin() {
        assert_eq!(authorize(Some(Role::Business), "/admin"), redirect("/"));
        assert_eq!(authorize(Some(Role::Worker), "/admin/blog"), redirect("/"));
        assert_eq!(authorize(None, "/api/admin/settings"), redirect("/"));
    }

    #[test]
    fn test_business_area_exact_role_only() {
        assert_eq!(authorize(Some(Role::Business), "/business/home"), allow());
        assert_eq!(
            authorize(Some(Role::Worker), "/business/home"),
            redirect("/worker/home")
        );
        assert_eq!(
            authorize(Some(Role::Admin), "/business/simulation"),
            redirect("/admin")
        );
        assert_eq!(authorize(None, "/business/home"), redirect("/"));
    }

    #[test]
    fn test_worker_area_exact_role_only() {
        assert_eq!(authorize(Some(Role::Worker), "/worker/home"), allow());
        assert_eq!(
            authorize(Some(Role::Business), "/worker/jobs"),
            redirect("/business/home")
        );
        assert_eq!(
            authorize(Some(Role::Editor), "/worker/home"),
            redirect("/admin")
        );
    }

    #[test]
    fn test_missing_role_is_least_privilege() {
        // A role lookup failure must be indistinguishable from no role.
        assert_eq!(authorize(None, "/admin"), redirect("/"));
        assert_eq!(authorize(None, "/worker/home"), redirect("/"));
    }

    #[test]
    fn test_admin_area_remainder() {
        assert_eq!(admin_area_remainder("/admin"), Some(""));
        assert_eq!(admin_area_remainder("/admin/blog/1"), Some("/blog/1"));
        assert_eq!(admin_area_remainder("/api/admin/theme"), Some("/theme"));
        assert_eq!(admin_area_remainder("/business/home"), None);
    }
}
