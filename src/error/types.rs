//! Error types
//!
//! Defines the error types returned by path resolution, storage setup and
//! the item access checks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Path resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Path traversal attempt: {0}")]
    Traversal(String),
    #[error("Path contains a null byte: {0:?}")]
    NullByte(String),
}

/// Why an item failed the existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFailure {
    /// Nothing exists at the resolved location.
    Missing,
    /// The path resolves (lexically or through a symlink) outside the root.
    OutsideRoot,
}

/// Access check failures.
///
/// Every variant maps to one of the keys understood by the upstream error
/// channel (see [`AccessError::key`]). The payload is the relative path the
/// check ran against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Directory does not exist: {path}")]
    DirectoryNotExist { path: String, cause: PathFailure },
    #[error("File does not exist: {path}")]
    FileDoesNotExist { path: String, cause: PathFailure },
    #[error("Forbidden name: {0}")]
    ForbiddenName(String),
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),
    #[error("Not allowed by the file system: {0}")]
    NotAllowedSystem(String),
    #[error("Not allowed: {0}")]
    NotAllowed(String),
}

impl AccessError {
    /// Error key consumed by the upstream error channel.
    pub fn key(&self) -> &'static str {
        match self {
            AccessError::DirectoryNotExist { .. } => "DIRECTORY_NOT_EXIST",
            AccessError::FileDoesNotExist { .. } => "FILE_DOES_NOT_EXIST",
            AccessError::ForbiddenName(_) => "FORBIDDEN_NAME",
            AccessError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AccessError::NotAllowedSystem(_) => "NOT_ALLOWED_SYSTEM",
            AccessError::NotAllowed(_) => "NOT_ALLOWED",
        }
    }

    /// Positional context arguments for the localized message.
    pub fn args(&self) -> Vec<&str> {
        match self {
            AccessError::DirectoryNotExist { path, .. }
            | AccessError::FileDoesNotExist { path, .. } => vec![path.as_str()],
            AccessError::ForbiddenName(path) | AccessError::InvalidFileType(path) => {
                vec![path.as_str()]
            }
            // Permission errors carry the path for logging only; the
            // user-facing message has no placeholders.
            AccessError::NotAllowedSystem(_) | AccessError::NotAllowed(_) => Vec::new(),
        }
    }

    /// The relative path the failed check was run against.
    pub fn path(&self) -> &str {
        match self {
            AccessError::DirectoryNotExist { path, .. }
            | AccessError::FileDoesNotExist { path, .. }
            | AccessError::ForbiddenName(path)
            | AccessError::InvalidFileType(path)
            | AccessError::NotAllowedSystem(path)
            | AccessError::NotAllowed(path) => path,
        }
    }

    /// Cause of an existence failure, `None` for the other kinds.
    pub fn path_failure(&self) -> Option<PathFailure> {
        match self {
            AccessError::DirectoryNotExist { cause, .. }
            | AccessError::FileDoesNotExist { cause, .. } => Some(*cause),
            _ => None,
        }
    }
}

/// Storage backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Storage root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),
    #[error("Invalid restriction pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_error_channel() {
        let missing = AccessError::FileDoesNotExist {
            path: "/a.txt".into(),
            cause: PathFailure::Missing,
        };
        assert_eq!(missing.key(), "FILE_DOES_NOT_EXIST");
        assert_eq!(missing.args(), vec!["/a.txt"]);
        assert_eq!(missing.path_failure(), Some(PathFailure::Missing));

        let dir = AccessError::DirectoryNotExist {
            path: "/docs/".into(),
            cause: PathFailure::OutsideRoot,
        };
        assert_eq!(dir.key(), "DIRECTORY_NOT_EXIST");
        assert_eq!(dir.path_failure(), Some(PathFailure::OutsideRoot));

        assert_eq!(AccessError::ForbiddenName("/x.exe".into()).key(), "FORBIDDEN_NAME");
        assert_eq!(AccessError::InvalidFileType("/x".into()).key(), "INVALID_FILE_TYPE");
        assert_eq!(AccessError::NotAllowedSystem("/x".into()).key(), "NOT_ALLOWED_SYSTEM");
        assert_eq!(AccessError::NotAllowed("/x".into()).key(), "NOT_ALLOWED");
    }

    #[test]
    fn test_permission_errors_have_no_message_args() {
        let err = AccessError::NotAllowed("/secret.txt".into());
        assert!(err.args().is_empty());
        assert_eq!(err.path(), "/secret.txt");
        assert_eq!(err.path_failure(), None);
    }
}
