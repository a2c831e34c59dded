use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::FoodStore;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FoodStore>,
    pub config: Arc<AppConfig>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn FoodStore>) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            store,
            config: Arc::new(config),
            tokens,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.security.token_cookie_name
    }
}
