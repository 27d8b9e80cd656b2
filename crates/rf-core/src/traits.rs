//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Post;
use crate::validation::Field;

/// Raw string storage addressed by key, the shape of a browser's localStorage.
///
/// Serialization is the caller's job; implementations only move strings.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Persistence contract for the published collection.
#[cfg_attr(test, mockall::automock)]
pub trait PostStore: Send + Sync {
    /// Adds `post` after every post already stored.
    fn append(&self, post: Post) -> Result<()>;
    /// Oldest first; empty when nothing was ever stored.
    fn load_all(&self) -> Result<Vec<Post>>;
    fn clear(&self) -> Result<()>;
}

impl<T: PostStore + ?Sized> PostStore for Arc<T> {
    fn append(&self, post: Post) -> Result<()> {
        (**self).append(post)
    }

    fn load_all(&self) -> Result<Vec<Post>> {
        (**self).load_all()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Source of publish timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The view layer. Receives display-ready strings only; it never validates or persists.
#[cfg_attr(test, mockall::automock)]
pub trait FeedRenderer {
    /// Adds one entry above all existing ones.
    fn insert_at_top(&mut self, title: &str, content: &str, timestamp: &str);
    fn clear_all(&mut self);
    fn show_empty_placeholder(&mut self);
    fn hide_empty_placeholder(&mut self);
    fn show_field_warning(&mut self, field: Field, message: &str);
    fn hide_field_warning(&mut self, field: Field);
    /// The stored history exists but could not be read.
    fn show_load_error(&mut self, message: &str);
}
