pub mod auth;
pub mod guard;
pub mod response;

pub use auth::{session_auth_middleware, AuthSession};
pub use guard::{classify, evaluate, route_guard_middleware, Decision, RedirectReason, RouteClass};
pub use response::{ApiResponse, ApiResult};
