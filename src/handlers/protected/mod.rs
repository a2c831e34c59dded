// handlers/protected/mod.rs - Protected handlers (token cookie required)
//
// Routes in this tier are wrapped in middleware::verify_token, so every
// handler can extract the AuthUser it injects.

pub mod foods;

pub use foods::*;
