use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::{Error, Result, StorageErrorCode};

/// Written next to the items. Stored data with any other version is discarded on load.
pub const STORAGE_VERSION: &str = "1.0.0";

pub trait Stored: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> &str;

    /// Checked on load in addition to a non-empty id.
    fn is_valid(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct CollectionData<'a, S> {
    items: &'a [S],
    version: &'a str,
}

#[derive(Deserialize)]
struct RawCollectionData {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    #[serde(default)]
    version: String,
}

/// A newest-first list persisted as `{ "items": [...], "version": "1.0.0" }` under one key.
///
/// Every change is written to the store before it is applied in memory, so a failed save
/// leaves the collection as it was.
#[derive(Debug, Clone)]
pub struct Collection<S> {
    key: &'static str,
    max_items: Option<usize>,
    items: Vec<S>,
}

impl<S: Stored> Collection<S> {
    pub fn new(key: &'static str, max_items: Option<usize>) -> Self {
        Collection {
            key,
            max_items,
            items: Vec::new(),
        }
    }

    /// Reads the collection back. Malformed or outdated data yields an empty collection and
    /// individual invalid items are dropped; only a failing store is an error.
    pub fn load<K>(key: &'static str, max_items: Option<usize>, store: &K) -> Result<Self>
    where
        K: KeyValueStore + ?Sized,
    {
        let mut collection = Self::new(key, max_items);

        let Some(raw) = store.get(key)? else {
            return Ok(collection);
        };

        let data: RawCollectionData = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored data is malformed, starting empty");
                return Ok(collection);
            }
        };

        if data.version != STORAGE_VERSION {
            tracing::warn!(
                key,
                found = %data.version,
                expected = STORAGE_VERSION,
                "stored data has a different version, starting empty"
            );
            return Ok(collection);
        }

        collection.items = data
            .items
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<S>(value) {
                Ok(item) if !item.id().is_empty() && item.is_valid() => Some(item),
                Ok(item) => {
                    tracing::warn!(key, id = item.id(), "dropping invalid stored item");
                    None
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "dropping unreadable stored item");
                    None
                }
            })
            .collect();

        if let Some(max_items) = max_items {
            collection.items.truncate(max_items);
        }

        Ok(collection)
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn items(&self) -> &[S] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&S> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts at the front, dropping the oldest items beyond the limit.
    pub fn add<K>(&mut self, item: S, store: &mut K) -> Result<()>
    where
        K: KeyValueStore + ?Sized,
    {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(item);
        items.extend(self.items.iter().cloned());

        self.set_items(items, store)
    }

    /// Returns `false` when no item has `id`.
    pub fn update<K, F>(&mut self, id: &str, update: F, store: &mut K) -> Result<bool>
    where
        K: KeyValueStore + ?Sized,
        F: FnOnce(&mut S),
    {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return Ok(false);
        };

        let mut items = self.items.clone();
        if let Some(item) = items.get_mut(index) {
            update(item);
        }
        self.set_items(items, store)?;

        Ok(true)
    }

    /// Returns `false` when no item has `id`.
    pub fn remove<K>(&mut self, id: &str, store: &mut K) -> Result<bool>
    where
        K: KeyValueStore + ?Sized,
    {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.set_items(items, store)?;

        Ok(true)
    }

    pub fn clear<K>(&mut self, store: &mut K) -> Result<()>
    where
        K: KeyValueStore + ?Sized,
    {
        self.set_items(Vec::new(), store)
    }

    pub fn set_items<K>(&mut self, mut items: Vec<S>, store: &mut K) -> Result<()>
    where
        K: KeyValueStore + ?Sized,
    {
        if let Some(max_items) = self.max_items {
            items.truncate(max_items);
        }

        self.save(&items, store)?;
        self.items = items;

        Ok(())
    }

    fn save<K>(&self, items: &[S], store: &mut K) -> Result<()>
    where
        K: KeyValueStore + ?Sized,
    {
        let data = CollectionData {
            items,
            version: STORAGE_VERSION,
        };
        let json = serde_json::to_string(&data).map_err(|e| {
            tracing::warn!(key = self.key, error = %e, "failed to serialize collection");
            Error::storage(StorageErrorCode::SaveError, self.key)
        })?;

        store.set(self.key, &json)
    }
}
