//! In-process toy store.
//!
//! Mirrors the MongoDB store's observable behavior (insertion order, exact
//! seller match, "modified" only when a value actually changes) and counts
//! every call so tests can assert that rejected requests never reach the store.
//! `set_failing(true)` makes every subsequent call fail like an unreachable
//! deployment would.

use crate::domain::toy::{NewToy, Toy, ToyDetail, ToyPatch};
use crate::storage::toys::store::{
    DeleteOutcome, StoreError, StoreResult, ToyStore, UpdateOutcome,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryToyStore {
    toys: RwLock<Vec<Toy>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryToyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Direct read of a stored toy, bypassing call accounting.
    pub async fn snapshot(&self, id: ObjectId) -> Option<Toy> {
        self.toys.read().await.iter().find(|t| t.id == id).cloned()
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ToyStore for InMemoryToyStore {
    async fn list_all(&self) -> StoreResult<Vec<Toy>> {
        self.enter()?;
        Ok(self.toys.read().await.clone())
    }

    async fn list_by_seller(&self, email: &str) -> StoreResult<Vec<Toy>> {
        self.enter()?;
        let toys = self.toys.read().await;
        Ok(toys
            .iter()
            .filter(|t| t.seller_email == email)
            .cloned()
            .collect())
    }

    async fn find_detail(&self, id: ObjectId) -> StoreResult<Option<ToyDetail>> {
        self.enter()?;
        let toys = self.toys.read().await;
        Ok(toys.iter().find(|t| t.id == id).map(ToyDetail::from))
    }

    async fn insert(&self, toy: NewToy) -> StoreResult<ObjectId> {
        self.enter()?;
        let id = ObjectId::new();
        self.toys.write().await.push(toy.with_id(id));
        Ok(id)
    }

    async fn update(&self, id: ObjectId, patch: &ToyPatch) -> StoreResult<UpdateOutcome> {
        self.enter()?;
        let mut toys = self.toys.write().await;
        match toys.iter_mut().find(|t| t.id == id) {
            Some(toy) => {
                let modified = patch.apply_to(toy);
                Ok(UpdateOutcome::new(1, u64::from(modified)))
            }
            None => Ok(UpdateOutcome::new(0, 0)),
        }
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<DeleteOutcome> {
        self.enter()?;
        let mut toys = self.toys.write().await;
        let before = toys.len();
        toys.retain(|t| t.id != id);
        Ok(DeleteOutcome::new((before - toys.len()) as u64))
    }

    async fn count(&self) -> StoreResult<u64> {
        self.enter()?;
        Ok(self.toys.read().await.len() as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.enter()
    }
}
