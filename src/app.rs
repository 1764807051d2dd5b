use std::sync::Arc;

use axum::{
    handler::Handler,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::{route_guard_middleware, session_auth_middleware};

/// Build the full router: guarded pages plus the session API
pub fn app(config: Arc<AppConfig>) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(session_routes())
        // Everything else is a page the guard fronts
        .route("/*path", get(public::page))
        .layer(middleware::from_fn_with_state(
            config.clone(),
            route_guard_middleware,
        ))
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

fn session_routes() -> Router<Arc<AppConfig>> {
    // Establish and logout work without a session; the rest require one
    let require_session = middleware::from_fn(session_auth_middleware);

    Router::new()
        .route(
            "/api/session",
            get(protected::session_whoami.layer(require_session.clone()))
                .post(public::session_establish)
                .delete(public::session_logout),
        )
        .route(
            "/api/session/role",
            put(protected::session_switch_role.layer(require_session)),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    // Session cookies must travel with cross-origin API calls
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
