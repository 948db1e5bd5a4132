//! Item access checks
//!
//! Each check is an idempotent gate: `Ok(())` lets the request continue, an
//! `Err` ends it. Cheap local checks run before the authorization callback,
//! which may be remote.

use std::path::Path;

use log::debug;

use super::model::Item;
use crate::error::{AccessError, PathFailure};

impl Item<'_> {
    /// Check that the item exists and is inside the storage root.
    ///
    /// The error key depends on the item type, not on which condition failed;
    /// the cause is carried separately.
    pub fn check_path(&self) -> Result<(), AccessError> {
        let cause = if !self.within_root {
            Some(PathFailure::OutsideRoot)
        } else if !self.exists {
            Some(PathFailure::Missing)
        } else if !self.storage.is_valid_path(&self.absolute_path) {
            Some(PathFailure::OutsideRoot)
        } else {
            None
        };

        let Some(cause) = cause else {
            return Ok(());
        };

        debug!("check_path failed for {}: {:?}", self.relative_path, cause);
        let path = self.relative_path.clone();
        Err(if self.is_dir {
            AccessError::DirectoryNotExist { path, cause }
        } else {
            AccessError::FileDoesNotExist { path, cause }
        })
    }

    /// Check the extension and path pattern restrictions.
    ///
    /// Files with a disallowed extension fail with `FORBIDDEN_NAME`. Any item
    /// whose path hits the pattern list fails with `INVALID_FILE_TYPE`.
    /// Folders have no extension and skip the first gate. Fails exactly when
    /// [`Item::is_unrestricted`] is false.
    ///
    /// Both lists see the normalized path, so `//`, `.` and `..` spellings of
    /// a target are judged like the target itself.
    pub fn check_restrictions(&self) -> Result<(), AccessError> {
        let path = &self.normalized_path;

        if !self.is_dir && !self.storage.is_allowed_extension(path) {
            return Err(AccessError::ForbiddenName(self.relative_path.clone()));
        }

        if !self.storage.is_allowed_path(path) {
            return Err(AccessError::InvalidFileType(self.relative_path.clone()));
        }

        Ok(())
    }

    /// Whether neither the extension list nor the pattern list blocks the item.
    pub fn is_unrestricted(&self) -> bool {
        let path = &self.normalized_path;
        let extension_ok = self.is_dir || self.storage.is_allowed_extension(path);
        extension_ok && self.storage.is_allowed_path(path)
    }

    /// Check that the item can be read: file system first, then the
    /// authorization callback.
    pub fn check_read_permission(&self) -> Result<(), AccessError> {
        let path = &self.absolute_path;

        if !self.is_contained(path) || !self.storage.has_system_read_permission(path) {
            return Err(AccessError::NotAllowedSystem(self.relative_path.clone()));
        }

        if !self.storage.has_read_permission(path) {
            return Err(AccessError::NotAllowed(self.relative_path.clone()));
        }

        Ok(())
    }

    /// Check that the item can be written.
    ///
    /// A missing item is about to be created, so the permission that matters
    /// is the one on its parent directory. Order: file system, the global
    /// read-only flag, then the authorization callback. A target that leaves
    /// the root, through `..` or a symlinked folder, is a file system denial.
    pub fn check_write_permission(&self) -> Result<(), AccessError> {
        let path = self.write_target();

        if !self.is_contained(path) || !self.storage.has_system_write_permission(path) {
            return Err(AccessError::NotAllowedSystem(self.relative_path.clone()));
        }

        if self.storage.config().is_read_only() {
            return Err(AccessError::NotAllowed(self.relative_path.clone()));
        }

        if !self.storage.has_write_permission(path) {
            return Err(AccessError::NotAllowed(self.relative_path.clone()));
        }

        Ok(())
    }

    /// Path whose write permission decides [`Item::check_write_permission`].
    pub fn write_target(&self) -> &Path {
        if self.exists {
            &self.absolute_path
        } else {
            self.absolute_path
                .parent()
                .unwrap_or(self.absolute_path.as_path())
        }
    }

    fn is_contained(&self, path: &Path) -> bool {
        let contained = self.within_root && self.storage.is_valid_path(path);
        if !contained {
            debug!("{} resolves outside the storage root", self.relative_path);
        }
        contained
    }

    /// File system and application read permission combined.
    pub fn is_readable(&self) -> bool {
        self.storage.has_system_read_permission(&self.absolute_path)
            && self.storage.has_read_permission(&self.absolute_path)
    }

    /// File system and application write permission combined, false while
    /// the storage is read-only.
    pub fn is_writable(&self) -> bool {
        self.storage.has_system_write_permission(&self.absolute_path)
            && !self.storage.config().is_read_only()
            && self.storage.has_write_permission(&self.absolute_path)
    }
}
