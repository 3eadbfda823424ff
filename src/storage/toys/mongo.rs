//! Toy store backed by a MongoDB collection.

use crate::domain::toy::{NewToy, Toy, ToyDetail, ToyPatch, DETAIL_FIELDS};
use crate::storage::toys::store::{
    DeleteOutcome, StoreError, StoreResult, ToyStore, UpdateOutcome,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, FindOneOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};

/// Holds the long-lived client and a typed handle to the toy collection.
///
/// The driver pools connections internally, so one instance is shared by all
/// request handlers for the lifetime of the process.
#[derive(Clone)]
pub struct MongoToyStore {
    client: Client,
    toys: Collection<Toy>,
}

impl MongoToyStore {
    /// Builds the client with Stable API v1 (strict, deprecation errors).
    ///
    /// This does not touch the network; call [`ToyStore::ping`] to verify the
    /// deployment is reachable.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        let server_api = ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build();
        options.server_api = Some(server_api);

        let client = Client::with_options(options)?;
        let toys = client.database(database).collection::<Toy>(collection);
        tracing::debug!(database, collection, "mongodb client created");
        Ok(Self { client, toys })
    }

    /// Closes the client's connections. Outstanding cursors are waited on.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

fn detail_projection() -> Document {
    let mut projection = Document::new();
    for field in DETAIL_FIELDS {
        projection.insert(*field, 1);
    }
    projection
}

fn set_document(patch: &ToyPatch) -> Document {
    let mut set = Document::new();
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    if let Some(quantity) = patch.available_quantity {
        set.insert("availableQuantity", quantity);
    }
    if let Some(description) = &patch.detail_description {
        set.insert("detailDescription", description.as_str());
    }
    set
}

#[async_trait]
impl ToyStore for MongoToyStore {
    async fn list_all(&self) -> StoreResult<Vec<Toy>> {
        let cursor = self.toys.find(None, None).await?;
        let toys: Vec<Toy> = cursor.try_collect().await?;
        Ok(toys)
    }

    async fn list_by_seller(&self, email: &str) -> StoreResult<Vec<Toy>> {
        let cursor = self.toys.find(doc! { "sellerEmail": email }, None).await?;
        let toys: Vec<Toy> = cursor.try_collect().await?;
        Ok(toys)
    }

    async fn find_detail(&self, id: ObjectId) -> StoreResult<Option<ToyDetail>> {
        let options = FindOneOptions::builder()
            .projection(detail_projection())
            .build();
        let detail = self
            .toys
            .clone_with_type::<ToyDetail>()
            .find_one(doc! { "_id": id }, options)
            .await?;
        Ok(detail)
    }

    async fn insert(&self, toy: NewToy) -> StoreResult<ObjectId> {
        let result = self
            .toys
            .clone_with_type::<NewToy>()
            .insert_one(toy, None)
            .await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Unexpected(format!(
                "inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })
    }

    async fn update(&self, id: ObjectId, patch: &ToyPatch) -> StoreResult<UpdateOutcome> {
        let result = self
            .toys
            .update_one(doc! { "_id": id }, doc! { "$set": set_document(patch) }, None)
            .await?;
        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<DeleteOutcome> {
        let result = self.toys.delete_one(doc! { "_id": id }, None).await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.toys.count_documents(None, None).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_keeps_detail_fields_only() {
        let projection = detail_projection();
        assert_eq!(projection.len(), DETAIL_FIELDS.len());
        assert!(projection.contains_key("sellerEmail"));
        assert!(!projection.contains_key("subCategory"));
    }

    #[test]
    fn set_document_only_contains_supplied_fields() {
        let patch = ToyPatch {
            price: Some(9.5),
            ..ToyPatch::default()
        };
        let set = set_document(&patch);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_f64("price").unwrap(), 9.5);
    }
}
