// handlers/public/foods.rs - listing endpoints open to anonymous callers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use mongodb::bson::{self, doc, Document};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::format::{document_to_api_value, documents_to_api_values, json_to_document};
use crate::database::{parse_object_id, DatabaseError, DeleteResult, InsertResult, UpdateResult};
use crate::error::{ApiError, ApiResult};
use crate::filter::{fields, types::FoodSort, FoodFilter, FEATURED_LIMIT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    /// Case-insensitive substring of the food name
    pub search: Option<String>,
    /// `asc` or `des` on expiry date; anything else leaves the order alone
    pub sort: Option<String>,
}

/// Fields written when a listing is claimed. Values are stored as supplied.
#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub additional_notes: Option<Value>,
    pub food_status: Option<Value>,
    /// Date string or timestamp
    pub request_date: Option<Value>,
    pub user_email: Option<Value>,
}

impl ClaimRequest {
    /// Exactly the four claim fields; missing ones are written as null
    pub fn into_document(self) -> Result<Document, bson::ser::Error> {
        let field = |value: Option<Value>| bson::to_bson(&value.unwrap_or(Value::Null));
        let additional_notes = field(self.additional_notes)?;
        let food_status = field(self.food_status)?;
        let request_date = field(self.request_date)?;
        let user_email = field(self.user_email)?;

        Ok(doc! {
            "additional_notes": additional_notes,
            "food_status": food_status,
            "request_date": request_date,
            "user_email": user_email,
        })
    }
}

/// GET /featured-foods - the six largest listings by quantity
pub async fn featured_get(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let documents = state.store.top(&FoodSort::featured(), FEATURED_LIMIT).await?;
    Ok(Json(documents_to_api_values(documents)))
}

/// GET /details/:id - a single listing, or null when nothing matches
pub async fn details_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_object_id(&id)?;
    let document = state.store.find_by_id(&id).await?;
    Ok(Json(document.map(document_to_api_value).unwrap_or(Value::Null)))
}

/// GET /available?search=&sort= - open listings, searchable and sortable by expiry
pub async fn available_get(
    State(state): State<AppState>,
    Query(query): Query<AvailableQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let filter = FoodFilter::available(query.search.as_deref());
    let sort = FoodSort::by_expiry(query.sort.as_deref());
    tracing::debug!("available search={:?} sort={:?}", query.search, sort);

    let documents = state.store.find(&filter, sort.as_ref()).await?;
    Ok(Json(documents_to_api_values(documents)))
}

/// POST /add-food - insert the payload as-is
pub async fn add_post(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> ApiResult<Json<InsertResult>> {
    let document = json_to_document(payload)?;
    let result = state.store.insert(document).await?;
    tracing::info!("Listing created: {}", result.inserted_id);
    Ok(Json(result))
}

/// PUT /update-status/:id - record a claim on a listing
pub async fn update_status_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(claim): Json<ClaimRequest>,
) -> ApiResult<Json<UpdateResult>> {
    let changes = claim.into_document().map_err(DatabaseError::from)?;
    apply_update(&state, &id, changes).await.map(Json)
}

/// PUT /update-food/:id - shallow merge of the supplied listing fields
pub async fn update_food_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut payload): Json<Map<String, Value>>,
) -> ApiResult<Json<UpdateResult>> {
    payload.remove(fields::ID);
    if state.config.store.restrict_edit_fields {
        payload.retain(|key, _| fields::LISTING_FIELDS.contains(&key.as_str()));
    }
    if payload.is_empty() {
        return Err(ApiError::bad_request("no fields to update"));
    }
    if let Some(key) = payload.keys().find(|key| !is_plain_field(key)) {
        return Err(ApiError::bad_request(format!("invalid field name: {}", key)));
    }

    let changes = json_to_document(payload)?;
    apply_update(&state, &id, changes).await.map(Json)
}

/// DELETE /remove-food/:id
pub async fn remove_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<DeleteResult>> {
    let id = parse_object_id(&id)?;
    let result = state.store.delete(&id).await?;
    tracing::info!("Delete {} removed {} listing(s)", id, result.deleted_count);
    Ok(Json(result))
}

/// Top-level field names only. Dotted paths and operator keys would mean
/// something else to the document store than a literal key.
fn is_plain_field(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('$') && !key.contains('.')
}

async fn apply_update(state: &AppState, id: &str, changes: Document) -> ApiResult<UpdateResult> {
    let upsert = state.config.store.upsert_on_update;
    let oid = parse_object_id(id)?;
    let result = state.store.set_fields(&oid, changes, upsert).await?;

    if result.is_miss() {
        return Err(ApiError::not_found(format!("food {} not found", id)));
    }
    if result.upserted_count > 0 {
        tracing::info!("Update on missing listing {} created it", id);
    }
    Ok(result)
}
