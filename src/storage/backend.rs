//! Storage backend trait: the capability set an item depends on.
//!
//! Everything here is a query. Implementations answer conservatively
//! (`false`, `0`, `None`) for missing or unreachable paths instead of
//! failing, so the item checks can run against paths that are about to be
//! created. The removal actions ([`StorageBackend::remove_file`] and
//! [`StorageBackend::unlink_recursive`]) are the exception and report I/O
//! errors.

use std::io;
use std::path::Path;

use crate::config::StorageConfig;

pub trait StorageBackend {
    /// Short backend identifier (`"local"`, ...).
    fn name(&self) -> &str;

    /// Configuration the backend was built from.
    fn config(&self) -> &StorageConfig;

    /// Absolute storage root.
    fn root(&self) -> &Path;

    /// Storage root as shown to clients, without the machine specific prefix.
    /// Always starts and ends with `/`.
    fn dynamic_root(&self) -> &str;

    /// Application level read permission (authorization callback).
    fn has_read_permission(&self, path: &Path) -> bool;

    /// Application level write permission (authorization callback).
    fn has_write_permission(&self, path: &Path) -> bool;

    /// OS level read permission.
    fn has_system_read_permission(&self, path: &Path) -> bool;

    /// OS level write permission.
    fn has_system_write_permission(&self, path: &Path) -> bool;

    /// Whether an existing absolute path is inside the root after resolving
    /// symlinks.
    fn is_valid_path(&self, path: &Path) -> bool;

    /// Extension allow/deny list, checked against a relative path.
    fn is_allowed_extension(&self, relative_path: &str) -> bool;

    /// Path pattern allow/deny list, checked against a relative path.
    fn is_allowed_path(&self, relative_path: &str) -> bool;

    fn is_image_file(&self, path: &Path) -> bool;

    fn real_file_size(&self, path: &Path) -> u64;

    fn image_dimensions(&self, path: &Path) -> Option<(u32, u32)>;

    /// Last modification time as unix seconds.
    fn modified_time(&self, path: &Path) -> Option<i64>;

    /// Creation time as unix seconds, when the backend records it.
    fn created_time(&self, path: &Path) -> Option<i64>;

    fn format_date(&self, timestamp: i64) -> String;

    /// Display path of an absolute path: the dynamic root followed by the
    /// root relative remainder.
    fn dynamic_path(&self, absolute_path: &Path) -> String;

    fn clean_path(&self, path: &str) -> String;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a folder and everything below it.
    fn unlink_recursive(&self, path: &Path) -> io::Result<()>;
}
