//! Authorization
//!
//! Application level access control consulted after the system checks.

pub mod callback;

pub use callback::{AllowAll, AuthorizationCallback, FnCallback, ScopedCallback};
