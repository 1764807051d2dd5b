use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::namespace::Namespace;
use crate::session::SessionIdentity;

/// Authenticated session context, injected for protected API handlers
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub identity: SessionIdentity,
    pub namespace: Namespace,
}

/// Rejects API calls that carry no usable session.
///
/// Page navigations are redirected by the route guard instead; API callers
/// get a JSON 401 they can act on.
pub async fn session_auth_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = SessionIdentity::from_headers(request.headers());

    if !identity.is_authenticated() {
        tracing::debug!("Rejected {} without session", request.uri().path());
        return Err(ApiError::unauthorized("Missing auth token or current role"));
    }

    let namespace = identity.namespace()?;
    request
        .extensions_mut()
        .insert(AuthSession { identity, namespace });

    Ok(next.run(request).await)
}
