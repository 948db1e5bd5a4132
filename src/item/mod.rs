//! Items
//!
//! Resolution, metadata and access checks for a single file or folder.

mod model;
mod operations;
mod results;

pub use model::Item;
pub use results::{FileAttributes, FolderAttributes, ItemInfo};
