use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::AppendHeaders,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::namespace::{normalize_franchise_name, Namespace};
use crate::session::cookies::{self, SetCookie};
use crate::session::{keys, SessionError, SessionIdentity, Tier};

#[derive(Debug, Deserialize)]
pub struct EstablishRequest {
    pub token: String,
    pub tier: i64,
    pub current_role: String,
    pub franchise_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionLanding {
    pub namespace: Namespace,
    pub redirect: String,
    pub session: SessionIdentity,
}

#[derive(Debug, Serialize)]
pub struct LoggedOut {
    pub redirect: String,
}

/// POST /api/session - Store the session returned by the backend login
///
/// The franchise display name is normalized here, once, before it is written
/// to the `franchiseName` cookie. Readers never normalize again.
///
/// Expected Input:
/// ```json
/// {
///   "token": "opaque backend token",
///   "tier": 4,
///   "current_role": "Broker",
///   "franchise_name": "Acme Corp",
///   "roles": ["Broker", "Analyst"]
/// }
/// ```
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": {
///     "namespace": "b/acme-corp/broker",
///     "redirect": "/b/acme-corp/broker/dashboard",
///     "session": { ... }
///   }
/// }
/// ```
pub async fn session_establish(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<EstablishRequest>, JsonRejection>,
) -> Result<(AppendHeaders<Vec<SetCookie>>, ApiResponse<SessionLanding>), ApiError> {
    let Json(payload) = payload?;

    let token = payload.token.trim();
    if token.is_empty() {
        return Err(ApiError::invalid_field("token", "Token is required"));
    }

    // Stored verbatim in a cookie, so resolve against what the cookie holds
    let role = cookies::cookie_safe(&payload.current_role);
    let role = role.as_str();
    if role.is_empty() {
        return Err(ApiError::invalid_field("current_role", "Current role is required"));
    }

    let tier = u8::try_from(payload.tier)
        .map_err(|_| SessionError::InvalidTier(payload.tier.to_string()))
        .and_then(Tier::try_from)?;

    // The cookie can only hold what `cookie_safe` keeps; resolve against that
    let franchise = payload
        .franchise_name
        .as_deref()
        .map(|f| cookies::cookie_safe(&normalize_franchise_name(f)))
        .filter(|f| !f.is_empty());

    if tier.requires_franchise() && franchise.is_none() {
        return Err(SessionError::MissingFranchise(tier).into());
    }

    let roles: Vec<String> = payload
        .roles
        .iter()
        .map(|r| cookies::cookie_safe(r))
        .filter(|r| !r.is_empty())
        .collect();

    let session = SessionIdentity {
        auth_token: Some(token.to_string()),
        current_role: Some(role.to_string()),
        // Global tiers never carry a franchise
        franchise_name: franchise.filter(|_| tier.requires_franchise()),
        tier: Some(tier),
        roles,
    };

    if !session.may_assume(role) {
        return Err(ApiError::invalid_field(
            "current_role",
            format!("Role '{}' is not among the user's roles", role),
        ));
    }

    let namespace = session.namespace()?;
    let redirect = namespace.dashboard_path(&config.guard.dashboard_segment);

    let jar = &config.cookies;
    let mut headers = vec![
        cookies::set_cookie(keys::AUTH_TOKEN, token, jar),
        cookies::set_cookie(keys::CURRENT_ROLE, role, jar),
        cookies::set_cookie(keys::TIER, &tier.to_string(), jar),
    ];
    headers.push(match &session.franchise_name {
        Some(franchise) => cookies::set_cookie(keys::FRANCHISE_NAME, franchise, jar),
        None => cookies::expire_cookie(keys::FRANCHISE_NAME, jar),
    });
    headers.push(if session.roles.is_empty() {
        cookies::expire_cookie(keys::ROLES, jar)
    } else {
        cookies::roles_cookie(&session.roles, jar)
    });

    tracing::info!("Session established for tier {} in namespace {}", tier, namespace);

    Ok((
        AppendHeaders(headers),
        ApiResponse::created(SessionLanding {
            namespace,
            redirect,
            session,
        }),
    ))
}

/// DELETE /api/session - Log out by expiring every session cookie
pub async fn session_logout(
    State(config): State<Arc<AppConfig>>,
) -> (AppendHeaders<Vec<SetCookie>>, ApiResponse<LoggedOut>) {
    (
        AppendHeaders(cookies::clear_session(&config.cookies)),
        ApiResponse::success(LoggedOut {
            redirect: config.guard.login_path.clone(),
        }),
    )
}
