//! Item model
//!
//! One file or folder addressed by a root relative path. Existence and type
//! are resolved once at construction; the parent and thumbnail items are
//! derived on first use and cached for the lifetime of the instance.

use std::cell::OnceCell;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::storage::StorageBackend;
use crate::storage::validation::{dirname, resolve, resolve_clamped, root_relative};

pub struct Item<'s> {
    pub(super) storage: &'s dyn StorageBackend,
    pub(super) relative_path: String,
    pub(super) absolute_path: PathBuf,
    /// Root relative form of `absolute_path`; restrictions match against it.
    pub(super) normalized_path: String,
    /// False when the relative path tried to climb above the root. The
    /// absolute path is then clamped and the file system is never consulted.
    pub(super) within_root: bool,
    pub(super) exists: bool,
    pub(super) is_dir: bool,
    parent: OnceCell<Option<Box<Item<'s>>>>,
    thumbnail: OnceCell<Box<Item<'s>>>,
}

impl<'s> Item<'s> {
    /// Resolve `path` against the backend root.
    ///
    /// Folder paths should end with `/`: for items that do not exist yet the
    /// trailing separator is the only hint that a folder is meant.
    pub fn new(storage: &'s dyn StorageBackend, path: impl Into<String>) -> Self {
        let relative_path = path.into();

        let (absolute_path, within_root) = match resolve(storage.root(), &relative_path) {
            Ok(absolute_path) => (absolute_path, true),
            Err(e) => {
                warn!("Rejected {:?}: {}", relative_path, e);
                (resolve_clamped(storage.root(), &relative_path), false)
            }
        };

        let exists = within_root && absolute_path.exists();
        let is_dir = if exists {
            absolute_path.is_dir()
        } else {
            relative_path.ends_with('/')
        };
        let normalized_path = root_relative(storage.root(), &absolute_path, is_dir);

        Self {
            storage,
            relative_path,
            absolute_path,
            normalized_path,
            within_root,
            exists,
            is_dir,
            parent: OnceCell::new(),
            thumbnail: OnceCell::new(),
        }
    }

    /// Path as supplied by the caller; doubles as the item id.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Canonical `/` rooted path of the resolved target, with a trailing
    /// separator for folders.
    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn storage(&self) -> &'s dyn StorageBackend {
        self.storage
    }

    /// Whether the item is the storage root folder.
    pub fn is_root(&self) -> bool {
        self.absolute_path == self.storage.root()
    }

    /// Parent folder item, `None` for the storage root.
    pub fn closest(&self) -> Option<&Item<'s>> {
        self.parent
            .get_or_init(|| {
                let mut path = self.storage.clean_path(dirname(&self.relative_path));
                // dirname() drops the trailing separator
                if path != "/" {
                    path.push('/');
                }
                if self.is_root() || path == self.storage.clean_path(&self.relative_path) {
                    return None;
                }
                Some(Box::new(Item::new(self.storage, path)))
            })
            .as_deref()
    }

    /// Item mirroring this one under the thumbnail folder.
    pub fn thumbnail(&self) -> &Item<'s> {
        self.thumbnail
            .get_or_init(|| Box::new(Item::new(self.storage, self.thumbnail_path())))
    }

    /// Relative path of the thumbnail counterpart, for files and folders alike.
    pub fn thumbnail_path(&self) -> String {
        let path = format!(
            "/{}/{}",
            self.storage.config().thumbnail_dir(),
            self.relative_path
        );
        self.storage.clean_path(&path)
    }

    /// Delete the file, or the folder with everything below it.
    ///
    /// The storage root and paths that tried to leave it are never removed.
    pub fn remove(&self) -> io::Result<()> {
        if !self.within_root || self.is_root() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("refusing to remove {}", self.relative_path),
            ));
        }

        let result = if self.is_dir {
            self.storage.unlink_recursive(&self.absolute_path)
        } else {
            self.storage.remove_file(&self.absolute_path)
        };

        match &result {
            Ok(()) => info!(
                "Removed {} (real: {})",
                self.relative_path,
                self.absolute_path.display()
            ),
            Err(e) => error!(
                "Failed to remove {} (real: {}): {}",
                self.relative_path,
                self.absolute_path.display(),
                e
            ),
        }
        result
    }
}

impl fmt::Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("relative_path", &self.relative_path)
            .field("absolute_path", &self.absolute_path)
            .field("normalized_path", &self.normalized_path)
            .field("within_root", &self.within_root)
            .field("exists", &self.exists)
            .field("is_dir", &self.is_dir)
            .finish_non_exhaustive()
    }
}
