pub mod auth;
pub mod foods;
pub mod server;
