//! The toy collection contract shared by the MongoDB and in-memory stores.

use crate::domain::toy::{NewToy, Toy, ToyDetail, ToyPatch};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("unexpected store response: {0}")]
    Unexpected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Raw result of a single-document update, shaped like the driver reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

/// Raw result of a single-document delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// One logical collection of toys. Every method is a single store round-trip.
#[async_trait]
pub trait ToyStore: Send + Sync {
    /// Every toy, unfiltered, in store order.
    async fn list_all(&self) -> StoreResult<Vec<Toy>>;

    /// Toys whose `sellerEmail` equals `email` exactly.
    async fn list_by_seller(&self, email: &str) -> StoreResult<Vec<Toy>>;

    /// The detail projection of one toy.
    async fn find_detail(&self, id: ObjectId) -> StoreResult<Option<ToyDetail>>;

    /// Inserts a toy and returns the identifier the store assigned.
    async fn insert(&self, toy: NewToy) -> StoreResult<ObjectId>;

    async fn update(&self, id: ObjectId, patch: &ToyPatch) -> StoreResult<UpdateOutcome>;

    async fn delete(&self, id: ObjectId) -> StoreResult<DeleteOutcome>;

    async fn count(&self) -> StoreResult<u64>;

    /// Round-trip used by the health probe and at startup.
    async fn ping(&self) -> StoreResult<()>;
}
