use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;
use tracing::debug;

use crate::filter::{types::{fields, FoodSort}, FoodFilter};

use super::manager::DatabaseError;
use super::repository::{DeleteResult, FoodStore, InsertResult, UpdateResult};

/// In-process listing store. Documents are kept in insertion order, which
/// stands in for the store's natural order when no sort is requested.
#[derive(Default)]
pub struct MemoryFoodStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryFoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn has_id(document: &Document, id: &ObjectId) -> bool {
        matches!(document.get(fields::ID), Some(Bson::ObjectId(existing)) if existing == id)
    }
}

#[async_trait]
impl FoodStore for MemoryFoodStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find(&self, filter: &FoodFilter, sort: Option<&FoodSort>) -> Result<Vec<Document>, DatabaseError> {
        let documents = self.documents.read().await;
        let mut found: Vec<Document> = documents.iter().filter(|d| filter.matches(d)).cloned().collect();
        if let Some(sort) = sort {
            sort.apply(&mut found);
        }
        debug!("memory find matched {} of {}", found.len(), documents.len());
        Ok(found)
    }

    async fn top(&self, sort: &FoodSort, limit: usize) -> Result<Vec<Document>, DatabaseError> {
        let mut all = self.documents.read().await.clone();
        sort.apply(&mut all);
        all.truncate(limit);
        Ok(all)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>, DatabaseError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|d| Self::has_id(d, id)).cloned())
    }

    async fn insert(&self, document: Document) -> Result<InsertResult, DatabaseError> {
        let mut documents = self.documents.write().await;

        let document = match document.get(fields::ID) {
            Some(_) => document,
            None => {
                let mut with_id = Document::new();
                with_id.insert(fields::ID, ObjectId::new());
                for (key, value) in document {
                    with_id.insert(key, value);
                }
                with_id
            }
        };

        let inserted_id = document.get(fields::ID).cloned().unwrap_or(Bson::Null);
        if documents.iter().any(|d| d.get(fields::ID) == Some(&inserted_id)) {
            return Err(DatabaseError::DuplicateKey(inserted_id.to_string()));
        }

        documents.push(document);
        Ok(InsertResult { acknowledged: true, inserted_id })
    }

    async fn set_fields(&self, id: &ObjectId, changes: Document, upsert: bool) -> Result<UpdateResult, DatabaseError> {
        let mut documents = self.documents.write().await;

        if let Some(existing) = documents.iter_mut().find(|d| Self::has_id(d, id)) {
            let mut modified = false;
            for (key, value) in changes {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateResult::new(1, u64::from(modified), None));
        }

        if !upsert {
            return Ok(UpdateResult::new(0, 0, None));
        }

        let mut created = Document::new();
        created.insert(fields::ID, *id);
        for (key, value) in changes {
            created.insert(key, value);
        }
        documents.push(created);
        Ok(UpdateResult::new(0, 0, Some(Bson::ObjectId(*id))))
    }

    async fn delete(&self, id: &ObjectId) -> Result<DeleteResult, DatabaseError> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|d| Self::has_id(d, id)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    async fn close(&self) {
        self.documents.write().await.clear();
    }
}
