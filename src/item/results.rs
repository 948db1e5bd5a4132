//! Item metadata
//!
//! The record handed to the API layer for one file or folder. Built fresh on
//! every call.

use serde::Serialize;

use super::model::Item;
use crate::storage::validation::extension;

/// Metadata of a file or folder, serialized as
/// `{ "id": ..., "type": "file" | "folder", "attributes": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemInfo {
    File {
        id: String,
        attributes: FileAttributes,
    },
    Folder {
        id: String,
        attributes: FolderAttributes,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileAttributes {
    pub name: String,
    pub extension: String,
    pub path: String,
    pub readable: u8,
    pub writable: u8,
    pub created: String,
    pub modified: String,
    pub timestamp: i64,
    /// Only measured when the file is readable
    pub size: u64,
    /// Only measured for readable, non-empty images
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderAttributes {
    pub name: String,
    pub path: String,
    pub readable: u8,
    pub writable: u8,
    pub created: String,
    pub modified: String,
    pub timestamp: i64,
}

impl ItemInfo {
    pub fn id(&self) -> &str {
        match self {
            ItemInfo::File { id, .. } | ItemInfo::Folder { id, .. } => id,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, ItemInfo::Folder { .. })
    }

    pub fn file_attributes(&self) -> Option<&FileAttributes> {
        match self {
            ItemInfo::File { attributes, .. } => Some(attributes),
            ItemInfo::Folder { .. } => None,
        }
    }

    pub fn folder_attributes(&self) -> Option<&FolderAttributes> {
        match self {
            ItemInfo::Folder { attributes, .. } => Some(attributes),
            ItemInfo::File { .. } => None,
        }
    }
}

impl Item<'_> {
    /// Build the metadata record. Works on missing items too, with empty
    /// dates and zero sizes.
    pub fn info(&self) -> ItemInfo {
        let storage = self.storage;
        let path = &self.absolute_path;

        let readable = self.is_readable();
        let writable = self.is_writable();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut display_path = storage.dynamic_path(path);
        if self.is_dir && !display_path.ends_with('/') {
            display_path.push('/');
        }

        let timestamp = storage.modified_time(path);
        let modified = timestamp
            .map(|ts| storage.format_date(ts))
            .unwrap_or_default();
        let created = storage
            .created_time(path)
            .map(|ts| storage.format_date(ts))
            .unwrap_or_default();
        let timestamp = timestamp.unwrap_or(0);

        if self.is_dir {
            return ItemInfo::Folder {
                id: self.relative_path.clone(),
                attributes: FolderAttributes {
                    name,
                    path: display_path,
                    readable: u8::from(readable),
                    writable: u8::from(writable),
                    created,
                    modified,
                    timestamp,
                },
            };
        }

        let mut attributes = FileAttributes {
            extension: extension(&name).to_string(),
            name,
            path: display_path,
            readable: u8::from(readable),
            writable: u8::from(writable),
            created,
            modified,
            timestamp,
            ..FileAttributes::default()
        };

        if readable {
            attributes.size = storage.real_file_size(path);

            // empty files have no header to read dimensions from
            if attributes.size > 0 && storage.is_image_file(path) {
                if let Some((width, height)) = storage.image_dimensions(path) {
                    attributes.width = width;
                    attributes.height = height;
                }
            }
        }

        ItemInfo::File {
            id: self.relative_path.clone(),
            attributes,
        }
    }
}
