use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AdvertisementStore, StoreResult};
use crate::modules::advertisements::models::{
    Advertisement, AdvertisementId, AdvertisementPatch, NewAdvertisement, SearchFilter,
};

#[derive(Debug)]
struct Inner {
    next_id: u64,
    records: Vec<Advertisement>,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        let id = AdvertisementId::Sequence(id.parse().ok()?);
        self.records.iter().position(|ad| ad.id == id)
    }
}

/// Process-lifetime store: an ordered `Vec` with ids from a counter starting
/// at 1. Ids are never reused, even after a delete.
#[derive(Debug)]
pub struct MemoryAdvertisementStore {
    inner: RwLock<Inner>,
}

impl MemoryAdvertisementStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryAdvertisementStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvertisementStore for MemoryAdvertisementStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, new: NewAdvertisement) -> StoreResult<Advertisement> {
        let mut inner = self.inner.write().await;
        let advertisement = new.with_id(AdvertisementId::Sequence(inner.next_id));
        inner.next_id += 1;
        inner.records.push(advertisement.clone());
        Ok(advertisement)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Advertisement>> {
        let inner = self.inner.read().await;
        Ok(inner.position(id).map(|index| inner.records[index].clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Advertisement>> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn update(
        &self,
        id: &str,
        patch: AdvertisementPatch,
    ) -> StoreResult<Option<Advertisement>> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.position(id) else {
            return Ok(None);
        };
        let advertisement = &mut inner.records[index];
        patch.apply(advertisement);
        Ok(Some(advertisement.clone()))
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.position(id) {
            Some(index) => {
                inner.records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search(&self, filter: &SearchFilter) -> StoreResult<Vec<Advertisement>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .filter(|ad| filter.matches(ad))
            .cloned()
            .collect())
    }
}
