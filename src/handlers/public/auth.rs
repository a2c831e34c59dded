// handlers/public/auth.rs - token acquisition and logout
//
// The identity payload is trusted as-is: whoever posts an email gets a token
// for it. Credential checks belong to the front end's identity provider.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Map, Value};

use crate::auth::cookie::{removal_cookie, token_cookie};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /jwt - sign the identity payload and set it as the token cookie
pub async fn jwt_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(identity): Json<Map<String, Value>>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let token = state.tokens.issue(identity)?;
    let cookie = token_cookie(state.cookie_name(), token, state.config.is_production());

    tracing::debug!("Issued access token valid for {}h", state.tokens.expiry_hours());
    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

/// GET /logout - expire the token cookie
pub async fn logout_get(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let cookie = removal_cookie(state.cookie_name(), state.config.is_production());
    (jar.add(cookie), Json(json!({ "success": true })))
}
