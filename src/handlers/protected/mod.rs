// handlers/protected - session required
//
// Routes here sit behind `session_auth_middleware`, which injects
// `AuthSession` or answers 401.

pub mod session;

pub use session::{session_switch_role, session_whoami};
