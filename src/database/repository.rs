use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::Serialize;

use crate::api::format::serialize_bson;
use crate::database::manager::DatabaseError;
use crate::filter::{types::FoodSort, FoodFilter};

/// Acknowledgement for a single insert
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_bson")]
    pub inserted_id: Bson,
}

/// Acknowledgement for a single-document update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(serialize_with = "serialize_bson")]
    pub upserted_id: Bson,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Bson>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id: upserted_id.unwrap_or(Bson::Null),
        }
    }

    /// True when the update neither matched nor created a document
    pub fn is_miss(&self) -> bool {
        self.matched_count == 0 && self.upserted_count == 0
    }
}

/// Acknowledgement for a single-document delete
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}

/// The listing collection. One implementation talks to MongoDB, the other
/// keeps documents in process; both honour the same filter and sort rules.
#[async_trait]
pub trait FoodStore: Send + Sync {
    /// Round trip to the backing store
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// All documents matching `filter`, optionally sorted
    async fn find(&self, filter: &FoodFilter, sort: Option<&FoodSort>) -> Result<Vec<Document>, DatabaseError>;

    /// The first `limit` documents of the whole collection in `sort` order
    async fn top(&self, sort: &FoodSort, limit: usize) -> Result<Vec<Document>, DatabaseError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>, DatabaseError>;

    /// Insert as-is; an `_id` is assigned when the document has none
    async fn insert(&self, document: Document) -> Result<InsertResult, DatabaseError>;

    /// `$set` the given fields on the document with `id`. With `upsert`, a
    /// miss inserts `{ _id: id, ..fields }`.
    async fn set_fields(&self, id: &ObjectId, fields: Document, upsert: bool) -> Result<UpdateResult, DatabaseError>;

    async fn delete(&self, id: &ObjectId) -> Result<DeleteResult, DatabaseError>;

    /// Release connections; the store must not be used afterwards
    async fn close(&self);
}

/// Parse a path identifier into an ObjectId
pub fn parse_object_id(id: &str) -> Result<ObjectId, DatabaseError> {
    ObjectId::parse_str(id).map_err(|_| DatabaseError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_object_ids() {
        let id = parse_object_id("65f1c2a4b3d2e1f0a9b8c7d6").unwrap();
        assert_eq!(id.to_hex(), "65f1c2a4b3d2e1f0a9b8c7d6");
        assert!(matches!(parse_object_id("not-an-id"), Err(DatabaseError::InvalidId(_))));
    }

    #[test]
    fn update_result_wire_format() {
        let id = ObjectId::parse_str("65f1c2a4b3d2e1f0a9b8c7d6").unwrap();
        let value = serde_json::to_value(UpdateResult::new(0, 0, Some(Bson::ObjectId(id)))).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "acknowledged": true,
                "matchedCount": 0,
                "modifiedCount": 0,
                "upsertedCount": 1,
                "upsertedId": "65f1c2a4b3d2e1f0a9b8c7d6",
            })
        );

        let miss = UpdateResult::new(0, 0, None);
        assert!(miss.is_miss());
        assert_eq!(serde_json::to_value(miss).unwrap()["upsertedId"], serde_json::Value::Null);
    }
}
