//! File system queries
//!
//! Size, timestamps and image probing for local files. All queries degrade to
//! zero/`None` instead of failing.

use std::fmt::Write;
use std::fs;
use std::io::Result;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;
use log::debug;

/// Size of a file in bytes, 0 when it cannot be read
pub fn real_file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|meta| meta.len()).unwrap_or(0)
}

fn unix_seconds(time: SystemTime) -> Option<i64> {
    let secs = time.duration_since(UNIX_EPOCH).ok()?.as_secs();
    i64::try_from(secs).ok()
}

/// Last modification time as unix seconds
pub fn modified_timestamp(path: &Path) -> Option<i64> {
    let meta = fs::metadata(path).ok()?;
    unix_seconds(meta.modified().ok()?)
}

/// Creation time as unix seconds, where the platform records one
pub fn created_timestamp(path: &Path) -> Option<i64> {
    let meta = fs::metadata(path).ok()?;
    unix_seconds(meta.created().ok()?)
}

/// Width and height read from the image header
pub fn image_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dimensions) => Some(dimensions),
        Err(e) => {
            debug!("Could not read image size of {}: {}", path.display(), e);
            None
        }
    }
}

/// Format a unix timestamp (UTC) with a strftime pattern
pub fn format_date(timestamp: i64, format: &str) -> String {
    let Some(datetime) = DateTime::from_timestamp(timestamp, 0) else {
        return String::new();
    };
    let mut formatted = String::new();
    if write!(formatted, "{}", datetime.format(format)).is_err() {
        return datetime.to_rfc3339();
    }
    formatted
}

/// Remove a directory and everything below it
pub fn unlink_recursive(path: &Path) -> Result<()> {
    fs::remove_dir_all(path)
}
