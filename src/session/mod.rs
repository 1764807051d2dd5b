//! Request-scoped session snapshot.
//!
//! The browser keeps the session as a handful of cookies. This module turns
//! those cookies into a `SessionIdentity` that is passed explicitly to the
//! resolver and the guard; nothing here reads global state.

pub mod cookies;
mod tier;

use axum::http::{header::COOKIE, HeaderMap};
use serde::Serialize;

use crate::namespace::{self, Namespace};

pub use tier::Tier;

/// Cookie names holding the serialized session
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const CURRENT_ROLE: &str = "currentRole";
    pub const FRANCHISE_NAME: &str = "franchiseName";
    pub const TIER: &str = "tier";
    /// Roles the user may switch between, `|` separated
    pub const ROLES: &str = "roles";

    pub const ALL: [&str; 5] = [AUTH_TOKEN, CURRENT_ROLE, FRANCHISE_NAME, TIER, ROLES];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid tier '{0}'")]
    InvalidTier(String),
    #[error("session has no current role")]
    MissingRole,
    #[error("tier {0} requires a franchise name")]
    MissingFranchise(Tier),
}

/// Parsed session attributes for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    pub current_role: Option<String>,
    pub franchise_name: Option<String>,
    pub tier: Option<Tier>,
    pub roles: Vec<String>,
}

impl SessionIdentity {
    /// Parse every `Cookie` header on the request
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut session = Self::default();
        for value in headers.get_all(COOKIE) {
            match value.to_str() {
                Ok(raw) => session.absorb(raw),
                Err(_) => tracing::debug!("Ignoring non-ASCII Cookie header"),
            }
        }
        session
    }

    /// Parse a single `Cookie` header value (`a=1; b=2`)
    pub fn from_cookie_header(raw: &str) -> Self {
        let mut session = Self::default();
        session.absorb(raw);
        session
    }

    fn absorb(&mut self, raw: &str) {
        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            if value.is_empty() {
                continue;
            }

            match name.trim() {
                keys::AUTH_TOKEN => self.auth_token = Some(value.to_string()),
                keys::CURRENT_ROLE => self.current_role = Some(value.to_string()),
                keys::FRANCHISE_NAME => self.franchise_name = Some(value.to_string()),
                keys::TIER => self.tier = value.parse().ok(),
                keys::ROLES => {
                    self.roles = value
                        .split('|')
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }
    }

    /// Both an auth token and a current role are present
    pub fn is_authenticated(&self) -> bool {
        non_empty(self.auth_token.as_deref()).is_some() && self.role().is_some()
    }

    /// Current role, if present and not blank
    pub fn role(&self) -> Option<&str> {
        non_empty(self.current_role.as_deref())
    }

    /// Whether the user may act as `role`. Unknown role lists allow anything.
    pub fn may_assume(&self, role: &str) -> bool {
        self.roles.is_empty() || self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Resolve the namespace this session operates in.
    ///
    /// A blank role never produces the malformed `a/` namespace; callers get
    /// `MissingRole` and send the user back through login instead.
    pub fn namespace(&self) -> Result<Namespace, SessionError> {
        let role = self.role().ok_or(SessionError::MissingRole)?;
        Ok(namespace::resolve(
            self.tier,
            role,
            self.franchise_name.as_deref().unwrap_or(""),
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_full_cookie_header() {
        let session = SessionIdentity::from_cookie_header(
            "authToken=abc123; currentRole=Broker; franchiseName=acme; tier=4; roles=Broker|Analyst",
        );

        assert_eq!(session.auth_token.as_deref(), Some("abc123"));
        assert_eq!(session.current_role.as_deref(), Some("Broker"));
        assert_eq!(session.franchise_name.as_deref(), Some("acme"));
        assert_eq!(session.tier, Some(Tier::FranchiseRole));
        assert_eq!(session.roles, vec!["Broker", "Analyst"]);
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_roles_split_on_pipe_only() {
        let session = SessionIdentity::from_cookie_header("roles=Broker|Sales,Ops");
        assert_eq!(session.roles, vec!["Broker", "Sales,Ops"]);
    }

    #[test]
    fn test_empty_and_unknown_values_are_absent() {
        let session = SessionIdentity::from_cookie_header("authToken=; tier=9; theme=dark; garbage");

        assert_eq!(session.auth_token, None);
        assert_eq!(session.tier, None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_multiple_cookie_headers_merge() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("authToken=t"));
        headers.append(COOKIE, HeaderValue::from_static("currentRole=admin; tier=2"));

        let session = SessionIdentity::from_headers(&headers);
        assert!(session.is_authenticated());
        assert_eq!(session.tier, Some(Tier::GlobalAdmin));
    }

    #[test]
    fn test_blank_role_is_not_authenticated() {
        let session = SessionIdentity {
            auth_token: Some("t".into()),
            current_role: Some("  ".into()),
            ..Default::default()
        };
        assert!(!session.is_authenticated());
        assert_eq!(session.namespace(), Err(SessionError::MissingRole));
    }

    #[test]
    fn test_namespace_uses_stored_franchise() {
        let session = SessionIdentity::from_cookie_header(
            "authToken=t; currentRole=Broker; franchiseName=acme-corp; tier=4",
        );
        assert_eq!(session.namespace().unwrap().as_str(), "b/acme-corp/broker");
    }

    #[test]
    fn test_may_assume_checks_known_roles() {
        let mut session = SessionIdentity::default();
        assert!(session.may_assume("anything"));

        session.roles = vec!["Broker".into(), "Analyst".into()];
        assert!(session.may_assume("analyst"));
        assert!(!session.may_assume("admin"));
    }
}
