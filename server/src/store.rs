//! Keyed in-memory storage for resources.
//!
//! Every operation takes the store's lock exactly once, so each call is
//! atomic: readers never see a record halfway through a write.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::StoreError;
use crate::model::{Resource, ResourceId};

/// Storage contract the request handlers are written against.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Insert or replace the record at `resource.id`.
    async fn put(&self, resource: Resource);

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError>;

    /// All records in insertion order. Empty when nothing is stored.
    async fn list(&self) -> Vec<Resource>;

    /// Replace every field except `id` of an existing record.
    async fn update(&self, id: ResourceId, resource: Resource) -> Result<(), StoreError>;

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError>;
}

#[derive(Debug)]
struct Slot {
    seq: u64,
    resource: Resource,
}

#[derive(Debug, Default)]
struct Slots {
    by_id: HashMap<ResourceId, Slot>,
    next_seq: u64,
}

/// `ResourceStore` backed by a `HashMap` behind a single `RwLock`.
///
/// Each slot remembers when its id was first inserted; replacing a record
/// keeps that position.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: RwLock<Slots>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn put(&self, resource: Resource) {
        let mut slots = self.slots.write().await;
        let id = resource.id;
        if let Some(slot) = slots.by_id.get_mut(&id) {
            trace!(id, "replacing stored resource");
            slot.resource = resource;
            return;
        }
        let seq = slots.next_seq;
        slots.next_seq += 1;
        slots.by_id.insert(id, Slot { seq, resource });
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        let slots = self.slots.read().await;
        slots
            .by_id
            .get(&id)
            .map(|slot| slot.resource.clone())
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Vec<Resource> {
        let slots = self.slots.read().await;
        let mut ordered: Vec<&Slot> = slots.by_id.values().collect();
        ordered.sort_by_key(|slot| slot.seq);
        ordered.into_iter().map(|slot| slot.resource.clone()).collect()
    }

    async fn update(&self, id: ResourceId, resource: Resource) -> Result<(), StoreError> {
        let mut slots = self.slots.write().await;
        let slot = slots.by_id.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        slot.resource = Resource { id, ..resource };
        Ok(())
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        let mut slots = self.slots.write().await;
        slots
            .by_id
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn resource(id: ResourceId, name: &str, quantity: i64, cents: i64) -> Resource {
        Resource {
            id,
            name: name.to_string(),
            quantity,
            price: Decimal::new(cents, 2),
        }
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn put_then_get_returns_record() {
        let store = InMemoryStore::new();
        store.put(resource(1, "ElectricFan", 14, 2090)).await;
        assert_eq!(store.get(1).await.unwrap(), resource(1, "ElectricFan", 14, 2090));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(store.get(7).await, Err(StoreError::NotFound(7))));
    }

    #[tokio::test]
    async fn put_existing_id_overwrites_every_field() {
        let store = InMemoryStore::new();
        store.put(resource(1, "ElectricFan", 14, 2090)).await;
        store.put(resource(1, "Heater", 2, 4999)).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(1).await.unwrap(), resource(1, "Heater", 2, 4999));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_across_overwrites() {
        let store = InMemoryStore::new();
        store.put(resource(30, "c", 1, 100)).await;
        store.put(resource(10, "a", 1, 100)).await;
        store.put(resource(20, "b", 1, 100)).await;
        store.put(resource(30, "c2", 2, 200)).await;

        let ids: Vec<ResourceId> = store.list().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let store = InMemoryStore::new();
        store.put(resource(1, "ElectricFan", 14, 2090)).await;
        store.update(1, resource(99, "ElectricFan", 15, 2980)).await.unwrap();
        assert_eq!(store.get(1).await.unwrap(), resource(1, "ElectricFan", 15, 2980));
        assert!(store.get(99).await.is_err());
    }

    #[tokio::test]
    async fn update_missing_is_not_found_and_inserts_nothing() {
        let store = InMemoryStore::new();
        let err = store.update(5, resource(5, "Ghost", 1, 100)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(5)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found_the_second_time() {
        let store = InMemoryStore::new();
        store.put(resource(1, "ElectricFan", 14, 2090)).await;
        store.delete(1).await.unwrap();
        assert!(matches!(store.delete(1).await, Err(StoreError::NotFound(1))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_missing_leaves_others_untouched() {
        let store = InMemoryStore::new();
        store.put(resource(1, "ElectricFan", 14, 2090)).await;
        assert!(store.delete(2).await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_puts_are_all_visible() {
        let store = std::sync::Arc::new(InMemoryStore::new());
        let mut tasks = Vec::new();
        for id in 0..32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.put(resource(id, "item", id, id * 100)).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
        for record in store.list().await {
            assert_eq!(record.quantity, record.id);
            assert_eq!(record.price, Decimal::new(record.id * 100, 2));
        }
    }
}
