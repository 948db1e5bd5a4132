//! Error handlers
//!
//! Logging and status mapping for rejected access checks.

use crate::error::types::{AccessError, PathFailure};
use log::warn;

/// Log a rejected access check.
pub fn handle_error(err: &AccessError) {
    match err.path_failure() {
        Some(PathFailure::OutsideRoot) => {
            warn!("{} ({}): path escapes storage root", err.key(), err.path())
        }
        _ => warn!("{} ({}): {}", err.key(), err.path(), err),
    }
}

/// Convert an access error to the status code the API layer responds with.
pub fn error_to_status_code(err: &AccessError) -> u16 {
    match err {
        AccessError::DirectoryNotExist { .. } => 404,
        AccessError::FileDoesNotExist { .. } => 404,
        AccessError::ForbiddenName(_) => 403,
        AccessError::InvalidFileType(_) => 403,
        AccessError::NotAllowedSystem(_) => 403,
        AccessError::NotAllowed(_) => 403,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existence_errors_map_to_not_found() {
        let err = AccessError::FileDoesNotExist {
            path: "/gone.txt".into(),
            cause: PathFailure::Missing,
        };
        assert_eq!(error_to_status_code(&err), 404);
        assert_eq!(error_to_status_code(&AccessError::NotAllowed("/x".into())), 403);
    }
}
