//! Persistence strategies for advertisements.
//!
//! Both stores honour the same contract: identifiers that cannot belong to
//! the store are treated as absent, search ANDs every supplied criterion,
//! and results come back in insertion order.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use adboard_http::error::AppError;

use super::models::{Advertisement, AdvertisementPatch, NewAdvertisement, SearchFilter};

pub use memory::MemoryAdvertisementStore;
pub use mongo::MongoAdvertisementStore;

/// Backend failures. Absent records are `Ok(None)`/`Ok(false)`, not errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database operation failed: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to encode update document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle the router holds for the lifetime of the process
pub type SharedStore = Arc<dyn AdvertisementStore>;

#[async_trait]
pub trait AdvertisementStore: Send + Sync {
    /// Short backend label for logs
    fn backend(&self) -> &'static str;

    /// Persist a new record and return it with its assigned id
    async fn create(&self, new: NewAdvertisement) -> StoreResult<Advertisement>;

    async fn get(&self, id: &str) -> StoreResult<Option<Advertisement>>;

    async fn list(&self) -> StoreResult<Vec<Advertisement>>;

    /// Apply `patch` and return the updated record, `None` if `id` is unknown
    async fn update(&self, id: &str, patch: AdvertisementPatch)
        -> StoreResult<Option<Advertisement>>;

    /// Remove the record; `false` if nothing matched
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    async fn search(&self, filter: &SearchFilter) -> StoreResult<Vec<Advertisement>>;
}
