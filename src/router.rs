use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::verify_token;
use crate::state::AppState;

/// Full application router with global middleware applied
pub fn app(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .layer(DefaultBodyLimit::max(state.config.server.max_request_size_bytes));

    Router::new()
        // Public
        .route("/", get(public::root_get))
        .merge(food_routes())
        .merge(auth_routes())
        // Token guarded
        .merge(user_routes(state.clone()))
        .layer(layers)
        .with_state(state)
}

fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/featured-foods", get(public::featured_get))
        .route("/details/:id", get(public::details_get))
        .route("/available", get(public::available_get))
        .route("/add-food", post(public::add_post))
        .route("/update-status/:id", put(public::update_status_put))
        .route("/update-food/:id", put(public::update_food_put))
        .route("/remove-food/:id", delete(public::remove_delete))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(public::jwt_post))
        .route("/logout", get(public::logout_get))
}

fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/food-request/:email", get(protected::food_request_get))
        .route("/manage-food/:email", get(protected::manage_food_get))
        .route_layer(middleware::from_fn_with_state(state, verify_token))
}

/// Fixed origin allow-list with credentials, so the browser sends the token cookie
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
