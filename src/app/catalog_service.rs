//! The Toy Catalog service.
//!
//! One method per catalog operation. Each method:
//! 1.  Validates its input (identifier format, request shape) without touching the store.
//! 2.  Performs exactly one store call.
//! 3.  Interprets the store's answer (empty listing, zero matched/modified/deleted).

use crate::domain::toy::{
    parse_toy_id, CreateToyRequest, Toy, ToyDetail, UpdateToyRequest, ValidationError,
};
use crate::storage::toys::{DeleteOutcome, StoreError, ToyStore, UpdateOutcome};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid toy ID format")]
    InvalidId,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User email is required.")]
    MissingEmail,
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("No toys found for this user.")]
    NoToysForSeller,
    #[error("Toy not found")]
    NotFound,
    /// The document is missing or the update changed nothing; the store
    /// result does not tell these apart.
    #[error("Toy not found or not updated")]
    NotUpdated,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Cheap to clone; every clone shares the same store handle.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ToyStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ToyStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ToyStore> {
        &self.store
    }

    pub async fn list_toys(&self) -> CatalogResult<Vec<Toy>> {
        Ok(self.store.list_all().await?)
    }

    /// Toys listed by one seller. An empty listing is reported as
    /// [`CatalogError::NoToysForSeller`] rather than an empty success.
    pub async fn toys_for_seller(&self, email: Option<&str>) -> CatalogResult<Vec<Toy>> {
        let email = match email {
            Some(e) if !e.is_empty() => e,
            _ => return Err(CatalogError::MissingEmail),
        };
        let toys = self.store.list_by_seller(email).await?;
        if toys.is_empty() {
            return Err(CatalogError::NoToysForSeller);
        }
        Ok(toys)
    }

    pub async fn toy_detail(&self, raw_id: &str) -> CatalogResult<ToyDetail> {
        let id = toy_id(raw_id)?;
        self.store
            .find_detail(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn add_toy(&self, request: CreateToyRequest) -> CatalogResult<ObjectId> {
        let toy = request.validate()?;
        let id = self.store.insert(toy).await?;
        tracing::info!(toy_id = %id, "toy added");
        Ok(id)
    }

    pub async fn update_toy(
        &self,
        raw_id: &str,
        request: UpdateToyRequest,
    ) -> CatalogResult<UpdateOutcome> {
        let id = toy_id(raw_id)?;
        let patch = request.into_patch()?;
        let outcome = self.store.update(id, &patch).await?;
        if outcome.modified_count == 0 {
            return Err(CatalogError::NotUpdated);
        }
        tracing::info!(toy_id = %id, "toy updated");
        Ok(outcome)
    }

    pub async fn remove_toy(&self, raw_id: &str) -> CatalogResult<DeleteOutcome> {
        let id = toy_id(raw_id)?;
        let outcome = self.store.delete(id).await?;
        if outcome.deleted_count == 0 {
            return Err(CatalogError::NotFound);
        }
        tracing::info!(toy_id = %id, "toy deleted");
        Ok(outcome)
    }
}

fn toy_id(raw: &str) -> CatalogResult<ObjectId> {
    parse_toy_id(raw).ok_or(CatalogError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::toys::InMemoryToyStore;
    use serde_json::json;

    fn service() -> (CatalogService, Arc<InMemoryToyStore>) {
        let store = Arc::new(InMemoryToyStore::new());
        (CatalogService::new(store.clone()), store)
    }

    fn request(email: &str) -> CreateToyRequest {
        serde_json::from_value(json!({
            "pictureUrl": "https://img.example.com/truck.png",
            "name": "Truck",
            "sellerName": "Grace",
            "sellerEmail": email,
            "subCategory": "trucks",
            "price": 25,
            "rating": 4.8,
            "availableQuantity": 7,
            "detailDescription": "A red truck"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_store() {
        let (catalog, store) = service();
        assert!(matches!(
            catalog.toy_detail("123").await,
            Err(CatalogError::InvalidId)
        ));
        assert!(matches!(
            catalog.remove_toy("nope").await,
            Err(CatalogError::InvalidId)
        ));
        assert!(matches!(
            catalog
                .update_toy("xyz", UpdateToyRequest::default())
                .await,
            Err(CatalogError::InvalidId)
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn missing_email_never_reaches_the_store() {
        let (catalog, store) = service();
        assert!(matches!(
            catalog.toys_for_seller(None).await,
            Err(CatalogError::MissingEmail)
        ));
        assert!(matches!(
            catalog.toys_for_seller(Some("")).await,
            Err(CatalogError::MissingEmail)
        ));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn empty_seller_listing_is_not_found() {
        let (catalog, _store) = service();
        catalog.add_toy(request("other@example.com")).await.unwrap();
        assert!(matches!(
            catalog.toys_for_seller(Some("seller@example.com")).await,
            Err(CatalogError::NoToysForSeller)
        ));
    }

    #[tokio::test]
    async fn unchanged_update_is_not_updated() {
        let (catalog, _store) = service();
        let id = catalog.add_toy(request("seller@example.com")).await.unwrap();
        let same: UpdateToyRequest = serde_json::from_value(json!({ "price": 25 })).unwrap();
        assert!(matches!(
            catalog.update_toy(&id.to_hex(), same).await,
            Err(CatalogError::NotUpdated)
        ));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let (catalog, store) = service();
        store.set_failing(true);
        assert!(matches!(
            catalog.list_toys().await,
            Err(CatalogError::Store(_))
        ));
    }
}
