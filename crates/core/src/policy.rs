//! Route gating by role.
//!
//! This only decides what the client offers to show. It is not a security
//! boundary: the data store accepts any request, so real authorization would
//! have to live on the server.

use crate::data::{Role, User};

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub prefix: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToLogin,
    Forbidden { required: Vec<Role> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::new()
            .with_rule("/admin", &[Role::Admin])
            .with_rule("/manager", &[Role::Manager])
    }
}

impl Policy {
    /// A policy with no protected routes.
    pub fn new() -> Self {
        Policy { rules: vec![] }
    }

    pub fn with_rule(mut self, prefix: &str, roles: &[Role]) -> Self {
        self.rules.push(Rule {
            prefix: prefix.trim_end_matches('/').to_string(),
            roles: roles.to_vec(),
        });
        self
    }

    /// The most specific rule covering `path`.
    pub fn rule_for(&self, path: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .filter(|rule| covers(&rule.prefix, path))
            .max_by_key(|rule| rule.prefix.len())
    }

    pub fn check(&self, user: Option<&User>, path: &str) -> Access {
        let Some(rule) = self.rule_for(path) else {
            return Access::Allow;
        };

        match user {
            None => Access::RedirectToLogin,
            Some(user) if rule.roles.contains(&user.role) => Access::Allow,
            Some(_) => Access::Forbidden {
                required: rule.roles.clone(),
            },
        }
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Where a user lands after login or when opening the root.
pub fn home_route(user: Option<&User>) -> &'static str {
    match user.map(|u| u.role) {
        Some(Role::Admin) => "/admin/dashboard",
        Some(Role::Manager) => "/manager/dashboard",
        _ => "/homepageUser",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User::new(
            String::from("someone"),
            String::new(),
            String::new(),
            role.parse().unwrap(),
        )
    }

    #[test]
    fn should_allow_public_routes() {
        let policy = Policy::default();
        assert_eq!(policy.check(None, "/homepageUser"), Access::Allow);
        assert_eq!(policy.check(None, "/novel/n1"), Access::Allow);
        assert_eq!(policy.check(Some(&user("reader")), "/chapter/c1"), Access::Allow);
        // prefix must match a whole segment
        assert_eq!(policy.check(None, "/administrators"), Access::Allow);
    }

    #[test]
    fn should_redirect_anonymous_on_protected_routes() {
        let policy = Policy::default();
        assert_eq!(policy.check(None, "/manager/novel/n1/add"), Access::RedirectToLogin);
        assert_eq!(policy.check(None, "/admin"), Access::RedirectToLogin);
    }

    #[test]
    fn should_forbid_wrong_role() {
        let policy = Policy::default();
        assert_eq!(
            policy.check(Some(&user("reader")), "/admin/dashboard"),
            Access::Forbidden {
                required: vec![Role::Admin]
            }
        );
        assert_eq!(
            policy.check(Some(&user("admin")), "/manager/create"),
            Access::Forbidden {
                required: vec![Role::Manager]
            }
        );
        assert_eq!(policy.check(Some(&user("MANAGER")), "/manager/create"), Access::Allow);
    }

    #[test]
    fn should_prefer_most_specific_rule() {
        let policy = Policy::default().with_rule("/manager/reports/", &[Role::Manager, Role::Admin]);
        assert_eq!(policy.check(Some(&user("admin")), "/manager/reports/daily"), Access::Allow);
        assert!(matches!(
            policy.check(Some(&user("admin")), "/manager/dashboard"),
            Access::Forbidden { .. }
        ));
    }

    #[test]
    fn should_pick_home_route_by_role() {
        assert_eq!(home_route(None), "/homepageUser");
        assert_eq!(home_route(Some(&user("reader"))), "/homepageUser");
        assert_eq!(home_route(Some(&user("manager"))), "/manager/dashboard");
        assert_eq!(home_route(Some(&user("admin"))), "/admin/dashboard");
    }
}
