use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, FindOptions, ServerApi, ServerApiVersion, UpdateOptions},
    Client, Collection,
};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::filter::{types::FoodSort, FoodFilter};

use super::manager::DatabaseError;
use super::repository::{DeleteResult, FoodStore, InsertResult, UpdateResult};

/// Listing store backed by a MongoDB collection
pub struct MongoFoodStore {
    client: Client,
    foods: Collection<Document>,
}

impl MongoFoodStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let uri = config.connection_string()?;
        let mut options = ClientOptions::parse(&uri)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let foods = client.database(&config.name).collection::<Document>(&config.collection);
        info!("MongoDB client created for {}.{}", config.name, config.collection);

        Ok(Self { client, foods })
    }
}

#[async_trait]
impl FoodStore for MongoFoodStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        info!("Pinged deployment, MongoDB connection is healthy");
        Ok(())
    }

    async fn find(&self, filter: &FoodFilter, sort: Option<&FoodSort>) -> Result<Vec<Document>, DatabaseError> {
        let query = filter.to_document();
        let options = FindOptions::builder().sort(sort.map(FoodSort::to_document)).build();
        debug!("find {:?} sort {:?}", query, options.sort);

        let cursor = self.foods.find(query, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn top(&self, sort: &FoodSort, limit: usize) -> Result<Vec<Document>, DatabaseError> {
        let pipeline = vec![
            doc! { "$sort": sort.to_document() },
            doc! { "$limit": limit as i64 },
        ];
        debug!("aggregate {:?}", pipeline);

        let cursor = self.foods.aggregate(pipeline, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>, DatabaseError> {
        Ok(self.foods.find_one(doc! { "_id": *id }, None).await?)
    }

    async fn insert(&self, document: Document) -> Result<InsertResult, DatabaseError> {
        let result = self.foods.insert_one(document, None).await?;
        Ok(InsertResult { acknowledged: true, inserted_id: result.inserted_id })
    }

    async fn set_fields(&self, id: &ObjectId, fields: Document, upsert: bool) -> Result<UpdateResult, DatabaseError> {
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .foods
            .update_one(doc! { "_id": *id }, doc! { "$set": fields }, options)
            .await?;

        Ok(UpdateResult::new(result.matched_count, result.modified_count, result.upserted_id))
    }

    async fn delete(&self, id: &ObjectId) -> Result<DeleteResult, DatabaseError> {
        let result = self.foods.delete_one(doc! { "_id": *id }, None).await?;
        Ok(DeleteResult::new(result.deleted_count))
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("Closed MongoDB client");
    }
}
