//! fm-storage - storage layer of a web file manager.
//!
//! Resolves client supplied relative paths into items under a storage root,
//! builds their metadata and gates every access through system permissions,
//! the read-only flag, extension/path restrictions and an application
//! supplied authorization callback.

pub mod auth;
pub mod config;
pub mod error;
pub mod item;
pub mod storage;
pub mod utils;

pub use auth::AuthorizationCallback;
pub use config::StorageConfig;
pub use error::{AccessError, PathError, PathFailure, StorageError};
pub use item::{Item, ItemInfo};
pub use storage::{LocalBackend, StorageBackend};
