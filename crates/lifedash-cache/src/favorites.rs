//! User-maintained list of favorite cryptocurrency ids.

use std::sync::Arc;

use lifedash_core::StorageError;

use crate::store::KvStore;

pub const FAVORITES_KEY: &str = "crypto-favorites";

/// Favorites persisted as a JSON array under a fixed key. Insertion order
/// is kept and ids are unique. Every mutation is written through.
pub struct Favorites {
    store: Arc<dyn KvStore>,
    ids: Vec<String>,
}

impl Favorites {
    /// Read the persisted list. A missing or unreadable entry yields an empty
    /// list.
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::debug!("Ignoring unreadable favorites: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                Vec::new()
            }
        };

        let mut favorites = Self {
            store,
            ids: Vec::with_capacity(ids.len()),
        };
        for id in ids {
            if !favorites.ids.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav == id)
    }

    /// Flip `id`'s membership. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> Result<bool, StorageError> {
        let now_favorite = !self.contains(id);
        if now_favorite {
            self.add(id)?;
        } else {
            self.remove(id)?;
        }
        Ok(now_favorite)
    }

    /// Mark `id` as a favorite. Idempotent.
    pub fn add(&mut self, id: &str) -> Result<(), StorageError> {
        let mut next = self.ids.clone();
        if !next.iter().any(|fav| fav == id) {
            next.push(id.to_string());
        }
        self.commit(next)
    }

    /// Unmark `id`. Idempotent.
    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        let next: Vec<String> = self.ids.iter().filter(|fav| *fav != id).cloned().collect();
        self.commit(next)
    }

    /// Write `next` through, then adopt it. A failed write leaves the list
    /// unchanged.
    fn commit(&mut self, next: Vec<String>) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(&next).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(FAVORITES_KEY, &json)?;
        self.ids = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_toggle_persists_across_reload() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

        let mut favorites = Favorites::load(store.clone());
        assert!(favorites.toggle("bitcoin").unwrap());
        assert!(favorites.toggle("solana").unwrap());

        let reloaded = Favorites::load(store.clone());
        assert_eq!(reloaded.ids(), ["bitcoin".to_string(), "solana".to_string()]);
        assert!(reloaded.contains("bitcoin"));
    }

    #[test]
    fn test_toggle_twice_removes() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store.clone());

        assert!(favorites.toggle("ethereum").unwrap());
        assert!(!favorites.toggle("ethereum").unwrap());
        assert!(Favorites::load(store).ids().is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let mut favorites = Favorites::load(store.clone());
        favorites.add("tether").unwrap();
        favorites.add("tether").unwrap();

        let reloaded = Favorites::load(store);
        assert_eq!(reloaded.ids().len(), 1);
    }

    #[test]
    fn test_duplicates_in_storage_are_collapsed() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store
            .set(FAVORITES_KEY, r#"["bitcoin","bitcoin","ethereum"]"#)
            .unwrap();
        let favorites = Favorites::load(store);
        assert_eq!(favorites.ids().len(), 2);
    }

    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(Some(r#"["bitcoin"]"#.to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".into()))
        }
    }

    #[test]
    fn test_failed_write_leaves_list_unchanged() {
        let mut favorites = Favorites::load(Arc::new(ReadOnlyStore));

        assert!(favorites.toggle("solana").is_err());
        assert!(favorites.remove("bitcoin").is_err());
        assert!(favorites.toggle("bitcoin").is_err());
        assert_eq!(favorites.ids(), ["bitcoin".to_string()]);
    }

    #[test]
    fn test_garbage_entry_loads_empty() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.set(FAVORITES_KEY, "not json").unwrap();
        assert!(Favorites::load(store).ids().is_empty());
    }
}
