use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::error::ImportError;

/// Key-value post metadata storage.
///
/// Posts are identified by a positive integer ID; each post carries one
/// scalar string per meta key. The host CMS provides the real implementation.
pub trait MetaStore: Send + Sync {
    /// Read one meta value; `None` when the post or key is absent
    fn get_meta(&self, post_id: u64, key: &str) -> Result<Option<String>, ImportError>;

    fn set_meta(&self, post_id: u64, key: &str, value: &str) -> Result<(), ImportError>;

    /// First post whose `key` meta equals `value`
    fn find_post_by_meta(&self, key: &str, value: &str) -> Result<Option<u64>, ImportError>;

    /// All posts that have a value stored under `key`, in ascending ID order
    fn posts_with_meta(&self, key: &str) -> Result<Vec<u64>, ImportError>;

    fn create_post(&self, title: &str) -> Result<u64, ImportError>;

    fn set_post_title(&self, post_id: u64, title: &str) -> Result<(), ImportError>;
}

#[derive(Debug, Default)]
struct Post {
    title: String,
    meta: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct Posts {
    next_id: u64,
    posts: BTreeMap<u64, Post>,
}

/// In-process store, mainly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Posts>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_title(&self, post_id: u64) -> Option<String> {
        self.inner
            .read()
            .ok()?
            .posts
            .get(&post_id)
            .map(|p| p.title.clone())
    }

    pub fn post_count(&self) -> usize {
        self.inner.read().map(|p| p.posts.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> ImportError {
    ImportError::Store("store lock poisoned".to_string())
}

fn missing_post(post_id: u64) -> ImportError {
    ImportError::Store(format!("post {} does not exist", post_id))
}

impl MetaStore for MemoryStore {
    fn get_meta(&self, post_id: u64, key: &str) -> Result<Option<String>, ImportError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .posts
            .get(&post_id)
            .and_then(|p| p.meta.get(key).cloned()))
    }

    fn set_meta(&self, post_id: u64, key: &str, value: &str) -> Result<(), ImportError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let post = inner
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| missing_post(post_id))?;
        post.meta.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn find_post_by_meta(&self, key: &str, value: &str) -> Result<Option<u64>, ImportError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .posts
            .iter()
            .find(|(_, p)| p.meta.get(key).map(String::as_str) == Some(value))
            .map(|(id, _)| *id))
    }

    fn posts_with_meta(&self, key: &str) -> Result<Vec<u64>, ImportError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .posts
            .iter()
            .filter(|(_, p)| p.meta.contains_key(key))
            .map(|(id, _)| *id)
            .collect())
    }

    fn create_post(&self, title: &str) -> Result<u64, ImportError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.posts.insert(
            id,
            Post {
                title: title.to_string(),
                meta: HashMap::new(),
            },
        );
        Ok(id)
    }

    fn set_post_title(&self, post_id: u64, title: &str) -> Result<(), ImportError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let post = inner
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| missing_post(post_id))?;
        post.title = title.to_string();
        Ok(())
    }
}
