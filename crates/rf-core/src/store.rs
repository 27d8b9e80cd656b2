//! # KvPostStore
//!
//! [`PostStore`] over any [`KeyValueStore`]: the whole collection lives under
//! one key as a JSON array, oldest post first.

use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::Post;
use crate::traits::{KeyValueStore, PostStore};

/// Storage key holding the persisted collection.
pub const POSTS_KEY: &str = "posts";

pub struct KvPostStore<K> {
    kv: K,
    /// Held across every read-modify-write so concurrent handlers cannot lose an append.
    write_lock: Mutex<()>,
}

impl<K: KeyValueStore> KvPostStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }

    fn read(&self) -> Result<Vec<Post>> {
        match self.kv.get(POSTS_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                warn!(error = %err, "persisted posts failed to parse");
                AppError::CorruptData(err)
            }),
        }
    }
}

impl<K: KeyValueStore> PostStore for KvPostStore<K> {
    fn append(&self, post: Post) -> Result<()> {
        // A poisoned lock guards no data, so recovering the guard is sound.
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut posts = self.read()?;
        posts.push(post);
        let raw = serde_json::to_string(&posts).map_err(AppError::CorruptData)?;
        self.kv.set(POSTS_KEY, &raw)?;

        debug!(count = posts.len(), "post appended");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Post>> {
        let posts = self.read()?;
        debug!(count = posts.len(), "posts loaded");
        Ok(posts)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.kv.remove(POSTS_KEY)?;
        debug!("posts cleared");
        Ok(())
    }
}
