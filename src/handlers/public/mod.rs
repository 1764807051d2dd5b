// handlers/public - no session required
//
// Service info, liveness, session establishment/logout, and the page
// placeholder the route guard fronts.

use axum::{
    extract::{OriginalUri, State},
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::middleware::ApiResponse;
use crate::namespace::Namespace;
use crate::session::SessionIdentity;

pub mod session;

pub use session::{session_establish, session_logout};

/// GET / - Service information
///
/// Root is always reachable; the client reads the profile and redirects.
pub async fn root(State(config): State<Arc<AppConfig>>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Harbor Gate",
            "version": version,
            "description": "Tiered namespace resolver and route guard",
            "login": config.guard.login_path,
            "endpoints": {
                "health": "/health (public)",
                "session": "POST|DELETE /api/session (public - establish, logout)",
                "whoami": "GET /api/session (session required)",
                "role": "PUT /api/session/role (session required)",
                "pages": "/a/{role}/..., /b/{franchise}/{role}/... (guarded)",
            }
        }
    }))
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}

#[derive(Debug, Serialize)]
pub struct PageView {
    pub path: String,
    pub namespace: Option<Namespace>,
}

/// GET /*path - Placeholder for the pages the guard lets through
pub async fn page(OriginalUri(uri): OriginalUri, headers: HeaderMap) -> ApiResponse<PageView> {
    let namespace = SessionIdentity::from_headers(&headers).namespace().ok();

    ApiResponse::success(PageView {
        path: uri.path().to_string(),
        namespace,
    })
}
