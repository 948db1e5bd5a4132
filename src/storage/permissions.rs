//! File permissions
//!
//! OS level permission checks. These answer "would the file system let this
//! process do it", independent of any application policy.

use std::path::Path;

#[cfg(unix)]
fn access(path: &Path, flags: nix::unistd::AccessFlags) -> bool {
    nix::unistd::access(path, flags).is_ok()
}

/// Check if the path can be read by this process. False for missing paths.
#[cfg(unix)]
pub fn is_readable(path: &Path) -> bool {
    access(path, nix::unistd::AccessFlags::R_OK)
}

/// Check if the path can be written by this process. False for missing paths.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    access(path, nix::unistd::AccessFlags::W_OK)
}

#[cfg(not(unix))]
pub fn is_readable(path: &Path) -> bool {
    path.metadata().is_ok()
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
