//! Configuration management for the storage layer
//!
//! Loaded once at startup from a TOML file with environment overrides.
//! Every section has defaults so a partial file is enough.

use chrono::format::{Item, StrftimeItems};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Complete storage configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub root: RootConfig,
    pub security: SecurityConfig,
    pub images: ImagesConfig,
    pub options: OptionsConfig,
}

/// Location of the user storage folder
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RootConfig {
    /// Directory all relative paths resolve under
    pub path: String,

    /// Prefix stripped from `path` to build the display root, typically the
    /// web server document root
    pub document_root: Option<String>,

    /// Create `path` when it does not exist yet
    pub create: bool,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            path: "userfiles".into(),
            document_root: None,
            create: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Global override: reject every write regardless of other permissions
    /// Environment: FM_SECURITY__READ_ONLY
    pub read_only: bool,

    /// File extension policy
    pub extensions: RestrictionConfig,

    /// Path pattern policy (shell globs matched against the relative path)
    pub patterns: RestrictionConfig,
}

/// Whether a restriction list enumerates what is allowed or what is denied.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListPolicy {
    AllowList,
    #[default]
    DisallowList,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RestrictionConfig {
    pub policy: ListPolicy,
    pub ignore_case: bool,
    pub restrictions: Vec<String>,
}

impl Default for RestrictionConfig {
    fn default() -> Self {
        Self {
            policy: ListPolicy::DisallowList,
            ignore_case: true,
            restrictions: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ImagesConfig {
    pub thumbnail: ThumbnailConfig,

    /// Extensions treated as images for dimension probing
    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            thumbnail: ThumbnailConfig::default(),
            extensions: ["jpg", "jpe", "jpeg", "gif", "png", "bmp", "webp", "svg"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Folder, relative to the storage root, mirroring the tree with thumbnails
    pub dir: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            dir: "_thumbs".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OptionsConfig {
    /// strftime format for `created`/`modified` attributes
    pub date_format: String,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            date_format: "%d %b %Y %H:%M".into(),
        }
    }
}

impl StorageConfig {
    /// Load configuration from `fm-storage.toml` or `config.toml` with
    /// environment overrides (`FM_SECURITY__READ_ONLY=true`, ...)
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_paths = ["fm-storage", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Self::build(File::with_name(config_path)) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message(format!(
                "No configuration found. Tried: {config_paths:?}"
            ))
        }))
    }

    /// Load configuration from an explicit file path
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix("FM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.root.path.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "root.path cannot be empty".into(),
            ));
        }

        let thumbs = self.images.thumbnail.dir.trim_matches('/');
        if thumbs.is_empty() {
            return Err(config::ConfigError::Message(
                "images.thumbnail.dir cannot be empty".into(),
            ));
        }
        if thumbs.split('/').any(|segment| segment == "..") {
            return Err(config::ConfigError::Message(
                "images.thumbnail.dir must stay inside the storage root".into(),
            ));
        }

        if StrftimeItems::new(&self.options.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(config::ConfigError::Message(format!(
                "options.date_format is not a valid format: {}",
                self.options.date_format
            )));
        }

        Ok(())
    }

    /// Storage root as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root.path)
    }

    /// Thumbnail folder, as configured under `images.thumbnail.dir`
    pub fn thumbnail_dir(&self) -> &str {
        &self.images.thumbnail.dir
    }

    /// Global read-only flag, as configured under `security.read_only`
    pub fn is_read_only(&self) -> bool {
        self.security.read_only
    }
}
