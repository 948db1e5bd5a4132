//! Restriction policies
//!
//! Static, config driven allow/deny lists: one over file extensions, one over
//! shell glob patterns matched against the root relative path.

use regex::{Regex, RegexBuilder};

use crate::config::{ListPolicy, RestrictionConfig};
use crate::error::StorageError;
use crate::storage::validation::extension;

/// Extension allow/deny list.
///
/// The empty string stands for "no extension", so an allow list that should
/// accept folders and extension-less files must contain `""`.
#[derive(Debug, Clone)]
pub struct ExtensionPolicy {
    policy: ListPolicy,
    ignore_case: bool,
    extensions: Vec<String>,
}

impl ExtensionPolicy {
    pub fn new(config: &RestrictionConfig) -> Self {
        let extensions = config
            .restrictions
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .map(|ext| {
                if config.ignore_case {
                    ext.to_lowercase()
                } else {
                    ext.to_string()
                }
            })
            .collect();

        Self {
            policy: config.policy,
            ignore_case: config.ignore_case,
            extensions,
        }
    }

    pub fn is_allowed(&self, relative_path: &str) -> bool {
        let ext = extension(relative_path);
        let listed = if self.ignore_case {
            let ext = ext.to_lowercase();
            self.extensions.iter().any(|e| *e == ext)
        } else {
            self.extensions.iter().any(|e| e == ext)
        };

        match self.policy {
            ListPolicy::AllowList => listed,
            ListPolicy::DisallowList => !listed,
        }
    }
}

/// Glob pattern allow/deny list.
///
/// `*` matches any run of characters including `/`, `?` matches one
/// character; everything else is literal.
#[derive(Debug, Clone)]
pub struct PathPolicy {
    policy: ListPolicy,
    patterns: Vec<Regex>,
}

/// Translate a shell glob into an anchored regular expression.
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            other => {
                let mut buf = [0u8; 4];
                regex.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    regex.push('$');
    regex
}

impl PathPolicy {
    pub fn new(config: &RestrictionConfig) -> Result<Self, StorageError> {
        let patterns = config
            .restrictions
            .iter()
            .map(|pattern| {
                RegexBuilder::new(&glob_to_regex(pattern))
                    .case_insensitive(config.ignore_case)
                    .build()
                    .map_err(|source| StorageError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            policy: config.policy,
            patterns,
        })
    }

    pub fn is_allowed(&self, relative_path: &str) -> bool {
        let matched = self.patterns.iter().any(|re| re.is_match(relative_path));
        match self.policy {
            ListPolicy::AllowList => matched,
            ListPolicy::DisallowList => !matched,
        }
    }
}
