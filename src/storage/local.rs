//! Local disk storage backend
//!
//! Maps root relative paths onto a directory of the local file system.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::auth::AuthorizationCallback;
use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::storage::backend::StorageBackend;
use crate::storage::restrictions::{ExtensionPolicy, PathPolicy};
use crate::storage::validation::{self, is_within_root};
use crate::storage::{filesystem, permissions};

/// Backend over a local directory.
///
/// The root is canonicalized once at construction so that every absolute
/// path handed out by items shares its prefix.
pub struct LocalBackend {
    config: StorageConfig,
    root: PathBuf,
    dynamic_root: String,
    extensions: ExtensionPolicy,
    patterns: PathPolicy,
    image_extensions: Vec<String>,
    auth: Box<dyn AuthorizationCallback>,
}

/// Join path components with `/`, whatever the platform separator.
fn slash_joined(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Display root: the part of `root` below `document_root`, wrapped in `/`.
fn build_dynamic_root(root: &Path, document_root: Option<&str>) -> String {
    let Some(document_root) = document_root else {
        return "/".to_string();
    };
    let document_root = Path::new(document_root);
    let document_root = document_root
        .canonicalize()
        .unwrap_or_else(|_| document_root.to_path_buf());

    match root.strip_prefix(&document_root) {
        Ok(rest) if rest.as_os_str().is_empty() => "/".to_string(),
        Ok(rest) => format!("/{}/", slash_joined(rest)),
        Err(_) => "/".to_string(),
    }
}

impl LocalBackend {
    /// Open the storage root described by `config`, creating it when
    /// `root.create` is set.
    pub fn new(
        config: StorageConfig,
        auth: Box<dyn AuthorizationCallback>,
    ) -> Result<Self, StorageError> {
        let configured_root = config.root_path();

        if !configured_root.exists() {
            if !config.root.create {
                return Err(StorageError::RootNotFound(configured_root));
            }
            fs::create_dir_all(&configured_root)?;
            info!("Created storage root {}", configured_root.display());
        }
        if !configured_root.is_dir() {
            return Err(StorageError::RootNotADirectory(configured_root));
        }

        let root = configured_root.canonicalize()?;
        let dynamic_root = build_dynamic_root(&root, config.root.document_root.as_deref());
        let extensions = ExtensionPolicy::new(&config.security.extensions);
        let patterns = PathPolicy::new(&config.security.patterns)?;
        let image_extensions = config
            .images
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();

        info!(
            "Local storage at {} (display root {})",
            root.display(),
            dynamic_root
        );

        Ok(Self {
            config,
            root,
            dynamic_root,
            extensions,
            patterns,
            image_extensions,
            auth,
        })
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn dynamic_root(&self) -> &str {
        &self.dynamic_root
    }

    fn has_read_permission(&self, path: &Path) -> bool {
        self.auth.has_read_permission(path)
    }

    fn has_write_permission(&self, path: &Path) -> bool {
        self.auth.has_write_permission(path)
    }

    fn has_system_read_permission(&self, path: &Path) -> bool {
        permissions::is_readable(path)
    }

    fn has_system_write_permission(&self, path: &Path) -> bool {
        permissions::is_writable(path)
    }

    fn is_valid_path(&self, path: &Path) -> bool {
        is_within_root(&self.root, path)
    }

    fn is_allowed_extension(&self, relative_path: &str) -> bool {
        self.extensions.is_allowed(relative_path)
    }

    fn is_allowed_path(&self, relative_path: &str) -> bool {
        self.patterns.is_allowed(relative_path)
    }

    fn is_image_file(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        let ext = validation::extension(&name).to_lowercase();
        !ext.is_empty() && self.image_extensions.contains(&ext)
    }

    fn real_file_size(&self, path: &Path) -> u64 {
        filesystem::real_file_size(path)
    }

    fn image_dimensions(&self, path: &Path) -> Option<(u32, u32)> {
        filesystem::image_dimensions(path)
    }

    fn modified_time(&self, path: &Path) -> Option<i64> {
        filesystem::modified_timestamp(path)
    }

    fn created_time(&self, path: &Path) -> Option<i64> {
        filesystem::created_timestamp(path)
    }

    fn format_date(&self, timestamp: i64) -> String {
        filesystem::format_date(timestamp, &self.config.options.date_format)
    }

    fn dynamic_path(&self, absolute_path: &Path) -> String {
        match absolute_path.strip_prefix(&self.root) {
            Ok(rest) if !rest.as_os_str().is_empty() => {
                format!("{}{}", self.dynamic_root, slash_joined(rest))
            }
            _ => self.dynamic_root.clone(),
        }
    }

    fn clean_path(&self, path: &str) -> String {
        validation::clean_path(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn unlink_recursive(&self, path: &Path) -> io::Result<()> {
        filesystem::unlink_recursive(path)
    }
}
