use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::borrow::Cow;

use crate::config::{AppConfig, GuardConfig};
use crate::session::SessionIdentity;

/// How the guard treats a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Outside the guard entirely (API, health, assets)
    Bypass,
    /// Reachable without a session
    Public,
    /// `/`; the client reads the profile and redirects itself
    Root,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    Unauthenticated,
    AlreadyAuthenticated,
    NamespaceMismatch,
}

/// Outcome of evaluating one navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Redirect {
        location: String,
        reason: RedirectReason,
    },
}

impl Decision {
    fn redirect(location: impl Into<String>, reason: RedirectReason) -> Self {
        Decision::Redirect {
            location: location.into(),
            reason,
        }
    }
}

pub fn classify(path: &str, config: &GuardConfig) -> RouteClass {
    if config.bypass_paths.iter().any(|p| under(path, p)) {
        RouteClass::Bypass
    } else if config.public_paths.iter().any(|p| under(path, p)) {
        RouteClass::Public
    } else if path == "/" || path.is_empty() {
        RouteClass::Root
    } else {
        RouteClass::Protected
    }
}

/// Decide whether a navigation to `path` may proceed.
///
/// `path` may be percent-encoded as it arrives on the wire; it is decoded
/// before any comparison. Never fails: a session that cannot be resolved
/// sends the user to login.
pub fn evaluate(path: &str, session: &SessionIdentity, config: &GuardConfig) -> Decision {
    let decoded = decode_path(path);
    let path = decoded.as_ref();

    match classify(path, config) {
        RouteClass::Bypass | RouteClass::Root => Decision::Allow,
        RouteClass::Public => {
            if !session.is_authenticated() || !under(path, &config.login_path) {
                return Decision::Allow;
            }
            match session.namespace() {
                Ok(ns) => Decision::redirect(
                    ns.dashboard_path(&config.dashboard_segment),
                    RedirectReason::AlreadyAuthenticated,
                ),
                Err(_) => Decision::Allow,
            }
        }
        RouteClass::Protected => {
            if !session.is_authenticated() {
                return Decision::redirect(&config.login_path, RedirectReason::Unauthenticated);
            }
            match session.namespace() {
                Ok(ns) if ns.contains_path(path) => Decision::Allow,
                Ok(ns) => Decision::redirect(
                    ns.dashboard_path(&config.dashboard_segment),
                    RedirectReason::NamespaceMismatch,
                ),
                Err(_) => Decision::redirect(&config.login_path, RedirectReason::Unauthenticated),
            }
        }
    }
}

/// Route guard applied to every page navigation
pub async fn route_guard_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let session = SessionIdentity::from_headers(request.headers());

    match evaluate(&path, &session, &config.guard) {
        Decision::Allow => {
            tracing::debug!("Guard allowed {}", path);
            next.run(request).await
        }
        Decision::Redirect { location, reason } => {
            tracing::debug!("Guard redirected {} to {} ({:?})", path, location, reason);
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Undecodable paths are compared as received
fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

/// `path` equals `prefix` or sits beneath it
fn under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    path.strip_prefix(prefix)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in(cookies: &str) -> SessionIdentity {
        SessionIdentity::from_cookie_header(cookies)
    }

    #[test]
    fn test_classify_paths() {
        let config = GuardConfig::default();
        assert_eq!(classify("/api/session", &config), RouteClass::Bypass);
        assert_eq!(classify("/health", &config), RouteClass::Bypass);
        assert_eq!(classify("/auth/login", &config), RouteClass::Public);
        assert_eq!(classify("/auth/onboarding/step-2", &config), RouteClass::Public);
        assert_eq!(classify("/auth/verify-email", &config), RouteClass::Public);
        assert_eq!(classify("/", &config), RouteClass::Root);
        assert_eq!(classify("/a/broker/dashboard", &config), RouteClass::Protected);
        assert_eq!(classify("/apidocs", &config), RouteClass::Protected);
    }

    #[test]
    fn test_unauthenticated_protected_redirects_to_login() {
        let decision = evaluate(
            "/a/broker/dashboard",
            &SessionIdentity::default(),
            &GuardConfig::default(),
        );
        assert_eq!(
            decision,
            Decision::Redirect {
                location: "/auth/login".into(),
                reason: RedirectReason::Unauthenticated,
            }
        );
    }

    #[test]
    fn test_token_without_role_redirects_to_login() {
        let decision = evaluate(
            "/a/broker/dashboard",
            &signed_in("authToken=t; tier=1"),
            &GuardConfig::default(),
        );
        assert!(matches!(
            decision,
            Decision::Redirect { reason: RedirectReason::Unauthenticated, .. }
        ));
    }

    #[test]
    fn test_namespace_mismatch_redirects_to_own_dashboard() {
        let session = signed_in("authToken=t; currentRole=Broker; franchiseName=Acme; tier=4");
        let decision = evaluate("/a/broker/dashboard", &session, &GuardConfig::default());
        assert_eq!(
            decision,
            Decision::Redirect {
                location: "/b/acme/broker/dashboard".into(),
                reason: RedirectReason::NamespaceMismatch,
            }
        );
    }

    #[test]
    fn test_inside_namespace_passes_through() {
        let session = signed_in("authToken=t; currentRole=Broker; franchiseName=acme; tier=4");
        let config = GuardConfig::default();
        assert_eq!(evaluate("/b/acme/broker/dashboard", &session, &config), Decision::Allow);
        assert_eq!(evaluate("/b/acme/broker/shares/42", &session, &config), Decision::Allow);
    }

    #[test]
    fn test_authenticated_login_visit_redirects_to_dashboard() {
        let session = signed_in("authToken=t; currentRole=SuperAdmin; franchiseName=richharbor; tier=3");
        let decision = evaluate("/auth/login", &session, &GuardConfig::default());
        assert_eq!(
            decision,
            Decision::Redirect {
                location: "/b/richharbor/superadmin/dashboard".into(),
                reason: RedirectReason::AlreadyAuthenticated,
            }
        );
    }

    #[test]
    fn test_authenticated_onboarding_is_allowed() {
        let session = signed_in("authToken=t; currentRole=admin; tier=2");
        assert_eq!(
            evaluate("/auth/onboarding", &session, &GuardConfig::default()),
            Decision::Allow
        );
    }

    #[test]
    fn test_root_and_bypass_always_allowed() {
        let config = GuardConfig::default();
        let anonymous = SessionIdentity::default();
        assert_eq!(evaluate("/", &anonymous, &config), Decision::Allow);
        assert_eq!(evaluate("/api/session", &anonymous, &config), Decision::Allow);
        assert_eq!(evaluate("/static/app.js", &anonymous, &config), Decision::Allow);
    }

    #[test]
    fn test_encoded_path_matches_franchise_with_space() {
        let session = signed_in("authToken=t; currentRole=Broker; franchiseName=acme corp; tier=4");
        let config = GuardConfig::default();

        let decision = evaluate("/a/broker/dashboard", &session, &config);
        assert_eq!(
            decision,
            Decision::Redirect {
                location: "/b/acme%20corp/broker/dashboard".into(),
                reason: RedirectReason::NamespaceMismatch,
            }
        );
        assert_eq!(
            evaluate("/b/acme%20corp/broker/dashboard", &session, &config),
            Decision::Allow
        );
    }

    #[test]
    fn test_custom_dashboard_segment() {
        let config = GuardConfig {
            dashboard_segment: "home".into(),
            ..GuardConfig::default()
        };
        let session = signed_in("authToken=t; currentRole=admin; tier=2");
        assert_eq!(
            evaluate("/a/broker/home", &session, &config),
            Decision::Redirect {
                location: "/a/admin/home".into(),
                reason: RedirectReason::NamespaceMismatch,
            }
        );
    }

    #[test]
    fn test_decision_serializes_with_action_tag() {
        let value = serde_json::to_value(Decision::redirect("/auth/login", RedirectReason::Unauthenticated))
            .unwrap();
        assert_eq!(value["action"], "redirect");
        assert_eq!(value["reason"], "unauthenticated");
        assert_eq!(value["location"], "/auth/login");
    }
}
