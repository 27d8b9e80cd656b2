//! rusty-feed/crates/rf-core/src/lib.rs
//!
//! The central domain logic and interface definitions for rusty-feed.

pub mod controller;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;
pub mod time;
pub mod traits;
pub mod validation;

// Re-exporting for easier access in other crates
pub use controller::*;
pub use error::*;
pub use memory::InMemoryKv;
pub use models::*;
pub use store::{KvPostStore, POSTS_KEY};
pub use time::*;
pub use traits::*;
pub use validation::*;
