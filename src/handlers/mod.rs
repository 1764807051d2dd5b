// handlers - two tiers of HTTP handlers
//
// Public (no session) → Protected (auth token + current role).
// Page navigations are additionally fronted by the route guard.
pub mod protected;
pub mod public;
