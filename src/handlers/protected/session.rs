use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::AppendHeaders,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthSession};
use crate::namespace::Namespace;
use crate::session::cookies::{self, SetCookie};
use crate::session::{keys, SessionIdentity};

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub session: SessionIdentity,
    pub namespace: Namespace,
    pub dashboard: String,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRoleRequest {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct RoleSwitched {
    pub role: String,
    pub namespace: Namespace,
    pub redirect: String,
}

/// GET /api/session - Current session and its namespace
pub async fn session_whoami(
    State(config): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthSession>,
) -> ApiResult<WhoAmI> {
    let dashboard = auth.namespace.dashboard_path(&config.guard.dashboard_segment);

    Ok(ApiResponse::success(WhoAmI {
        session: auth.identity,
        namespace: auth.namespace,
        dashboard,
    }))
}

/// PUT /api/session/role - Switch the active role
///
/// The tier and franchise stay as they are; only `currentRole` is rewritten,
/// and the response carries the dashboard of the namespace the new role
/// resolves to.
pub async fn session_switch_role(
    State(config): State<Arc<AppConfig>>,
    Extension(auth): Extension<AuthSession>,
    payload: Result<Json<SwitchRoleRequest>, JsonRejection>,
) -> Result<(AppendHeaders<[SetCookie; 1]>, ApiResponse<RoleSwitched>), ApiError> {
    let Json(payload) = payload?;
    let role = cookies::cookie_safe(&payload.role);
    let role = role.as_str();
    if role.is_empty() {
        return Err(ApiError::invalid_field("role", "Role is required"));
    }

    if !auth.identity.may_assume(role) {
        tracing::warn!("Refused switch to role '{}' outside {:?}", role, auth.identity.roles);
        return Err(ApiError::forbidden(format!("Role '{}' is not assigned to this user", role)));
    }

    let switched = SessionIdentity {
        current_role: Some(role.to_string()),
        ..auth.identity
    };
    let namespace = switched.namespace()?;
    let redirect = namespace.dashboard_path(&config.guard.dashboard_segment);

    tracing::info!("Role switched from {} to {}", auth.namespace, namespace);

    Ok((
        AppendHeaders([cookies::set_cookie(keys::CURRENT_ROLE, role, &config.cookies)]),
        ApiResponse::success(RoleSwitched {
            role: role.to_string(),
            namespace,
            redirect,
        }),
    ))
}
