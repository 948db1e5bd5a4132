//! File system storage management
//!
//! Path resolution, the backend capability trait and its local disk
//! implementation, permission and restriction queries.

pub mod backend;
pub mod filesystem;
pub mod local;
pub mod permissions;
pub mod restrictions;
pub mod validation;

pub use backend::StorageBackend;
pub use local::LocalBackend;
pub use validation::{clean_path, resolve, resolve_clamped};
