//! Named response caches.

use std::collections::BTreeMap;

use crate::http::Response;

/// A set of named caches, each mapping URLs to stored responses.
pub trait CacheStorage {
    /// Stored response for `url` in cache `name`.
    fn lookup(
        &self,
        name: &str,
        url: &str,
    ) -> Option<Response>;

    /// Store all entries in cache `name`, creating it if needed.
    fn put_all(
        &mut self,
        name: &str,
        entries: Vec<(String, Response)>,
    );

    /// Names of all existing caches.
    fn names(&self) -> Vec<String>;

    /// Delete cache `name`. Returns `false` if it did not exist.
    fn delete(
        &mut self,
        name: &str,
    ) -> bool;
}

/// In-memory storage, ordered by cache name.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    caches: BTreeMap<String, BTreeMap<String, Response>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    /// Number of entries in cache `name`.
    pub fn len(
        &self,
        name: &str,
    ) -> usize {
        self.caches.get(name).map_or(0, BTreeMap::len)
    }
}

impl CacheStorage for MemoryStorage {
    fn lookup(
        &self,
        name: &str,
        url: &str,
    ) -> Option<Response> {
        self.caches.get(name)?.get(url).cloned()
    }

    fn put_all(
        &mut self,
        name: &str,
        entries: Vec<(String, Response)>,
    ) {
        self.caches.entry(name.to_owned()).or_default().extend(entries);
    }

    fn names(&self) -> Vec<String> { self.caches.keys().cloned().collect() }

    fn delete(
        &mut self,
        name: &str,
    ) -> bool {
        self.caches.remove(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_lookup() {
        let mut storage = MemoryStorage::new();
        storage.put_all("v1", vec![("./a".to_owned(), Response::new(200, "a"))]);

        assert_eq!(storage.lookup("v1", "./a"), Some(Response::new(200, "a")));
        assert_eq!(storage.lookup("v1", "./b"), None);
        assert_eq!(storage.lookup("v2", "./a"), None, "Caches are separate");
    }

    #[test]
    fn test_put_overwrites_same_url() {
        let mut storage = MemoryStorage::new();
        storage.put_all("v1", vec![("./a".to_owned(), Response::new(200, "old"))]);
        storage.put_all("v1", vec![("./a".to_owned(), Response::new(200, "new"))]);

        assert_eq!(storage.len("v1"), 1);
        assert_eq!(storage.lookup("v1", "./a").map(|r| r.body), Some(b"new".to_vec()));
    }

    #[test]
    fn test_delete_and_names() {
        let mut storage = MemoryStorage::new();
        storage.put_all("b", Vec::new());
        storage.put_all("a", Vec::new());
        assert_eq!(storage.names(), vec!["a".to_owned(), "b".to_owned()]);

        assert!(storage.delete("a"));
        assert!(!storage.delete("a"));
        assert_eq!(storage.names(), vec!["b".to_owned()]);
    }
}
