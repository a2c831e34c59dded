// handlers/protected/foods.rs - per-user listing views
//
// Both routes sit behind the token guard and additionally require the
// token's email to match the :email path segment.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use crate::api::format::documents_to_api_values;
use crate::error::ApiResult;
use crate::filter::FoodFilter;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /food-request/:email - listings the caller has claimed
pub async fn food_request_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    user.ensure_owner(&email)?;
    let documents = state.store.find(&FoodFilter::requested_by(&email), None).await?;
    Ok(Json(documents_to_api_values(documents)))
}

/// GET /manage-food/:email - the caller's own listings still on offer
pub async fn manage_food_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    user.ensure_owner(&email)?;
    let documents = state.store.find(&FoodFilter::donated_by(&email), None).await?;
    Ok(Json(documents_to_api_values(documents)))
}
