// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Listing reads and writes plus token acquisition. Nothing here looks at
// the token cookie.

pub mod auth;
pub mod foods;

pub use auth::*;
pub use foods::*;

/// GET / - liveness probe
pub async fn root_get() -> &'static str {
    "Assignment eleven running"
}
