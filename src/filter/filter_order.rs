use std::cmp::Ordering;

use mongodb::bson::{Bson, Document};

use super::types::{fields, FoodSort, SortDirection};

impl FoodSort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }

    /// Highest quantity first
    pub fn featured() -> Self {
        Self::new(fields::FOOD_QUANTITY, SortDirection::Desc)
    }

    /// Sort by expiry for a `sort` query parameter, if it names a direction
    pub fn by_expiry(param: Option<&str>) -> Option<Self> {
        SortDirection::from_param(param).map(|dir| Self::new(fields::EXPIRED_DATE, dir))
    }

    pub fn to_document(&self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.field.clone(), self.direction.to_mongo());
        sort
    }

    /// Order two documents on the sort field, following the store's
    /// cross-type comparison order.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ord = compare_bson(a.get(&self.field), b.get(&self.field));
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// Stable in-place sort, ties keep their existing order
    pub fn apply(&self, documents: &mut [Document]) {
        documents.sort_by(|a, b| self.compare(a, b));
    }
}

// Missing and null sort first, then numbers, strings, objects, arrays,
// binary, ids, booleans, dates.
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) | Some(Bson::Undefined) => 0,
        Some(Bson::Int32(_)) | Some(Bson::Int64(_)) | Some(Bson::Double(_)) | Some(Bson::Decimal128(_)) => 1,
        Some(Bson::String(_)) | Some(Bson::Symbol(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::Binary(_)) => 5,
        Some(Bson::ObjectId(_)) => 6,
        Some(Bson::Boolean(_)) => 7,
        Some(Bson::DateTime(_)) | Some(Bson::Timestamp(_)) => 8,
        Some(_) => 9,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

pub fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }

    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.timestamp_millis().cmp(&y.timestamp_millis()),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}
