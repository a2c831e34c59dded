use mongodb::bson::{self, Bson, Document};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::database::DatabaseError;

/// Convert a stored value into the public wire format.
/// ObjectIds become 24-char hex strings and dates become RFC 3339 strings;
/// everything else maps onto the obvious JSON shape.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::Number(n.into()),
        Bson::Int64(n) => Value::Number(n.into()),
        Bson::Double(n) => Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::Number(dt.timestamp_millis().into())),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_api_value(doc),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_api_value(document: Document) -> Value {
    let mut obj = Map::new();
    for (key, value) in document {
        obj.insert(key, bson_to_json(value));
    }
    Value::Object(obj)
}

/// Convert a list of documents to API values
pub fn documents_to_api_values(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(document_to_api_value).collect()
}

/// `serialize_with` adapter so response structs can carry raw ids
pub fn serialize_bson<S: Serializer>(value: &Bson, serializer: S) -> Result<S::Ok, S::Error> {
    bson_to_json(value.clone()).serialize(serializer)
}

/// Convert a client payload into a document
pub fn json_to_document(payload: Map<String, Value>) -> Result<Document, DatabaseError> {
    Ok(bson::to_document(&payload)?)
}
