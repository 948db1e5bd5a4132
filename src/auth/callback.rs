//! Authorization callback
//!
//! Application specific access control plugged into the storage layer. The
//! storage layer never decides *who* may touch a path; it asks the callback
//! after the file system itself has agreed.

use std::path::{Path, PathBuf};

/// Read/write predicates over absolute paths.
pub trait AuthorizationCallback {
    fn has_read_permission(&self, path: &Path) -> bool;
    fn has_write_permission(&self, path: &Path) -> bool;
}

/// Callback that grants everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthorizationCallback for AllowAll {
    fn has_read_permission(&self, _path: &Path) -> bool {
        true
    }

    fn has_write_permission(&self, _path: &Path) -> bool {
        true
    }
}

/// Callback built from a pair of closures.
pub struct FnCallback<R, W> {
    read: R,
    write: W,
}

impl<R, W> FnCallback<R, W>
where
    R: Fn(&Path) -> bool,
    W: Fn(&Path) -> bool,
{
    pub fn new(read: R, write: W) -> Self {
        Self { read, write }
    }
}

impl<R, W> AuthorizationCallback for FnCallback<R, W>
where
    R: Fn(&Path) -> bool,
    W: Fn(&Path) -> bool,
{
    fn has_read_permission(&self, path: &Path) -> bool {
        (self.read)(path)
    }

    fn has_write_permission(&self, path: &Path) -> bool {
        (self.write)(path)
    }
}

/// Scopes a user to one subtree: reads and writes are granted only under
/// `home`, plus read access to every ancestor so the user can navigate down.
#[derive(Debug, Clone)]
pub struct ScopedCallback {
    home: PathBuf,
}

impl ScopedCallback {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl AuthorizationCallback for ScopedCallback {
    fn has_read_permission(&self, path: &Path) -> bool {
        path.starts_with(&self.home) || self.home.starts_with(path)
    }

    fn has_write_permission(&self, path: &Path) -> bool {
        path.starts_with(&self.home)
    }
}
