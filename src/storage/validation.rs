//! Path validation
//!
//! Resolves caller supplied relative paths under the storage root and
//! normalizes derived paths. Resolution is purely lexical; the symlink aware
//! containment check lives in [`is_within_root`].

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::PathError;

/// Split a relative path into its normal segments.
///
/// Accepts both `/` and `\` as separators. `..` pops the previous segment;
/// popping past the root is reported through the returned flag and ignored.
fn normalize_segments(relative: &str) -> (Vec<&str>, bool) {
    let mut segments: Vec<&str> = Vec::new();
    let mut escaped = false;

    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    escaped = true;
                }
            }
            other => segments.push(other),
        }
    }

    (segments, escaped)
}

fn join_segments(root: &Path, segments: &[&str]) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in segments {
        path.push(segment);
    }
    path
}

/// Resolve `relative` under `root`, rejecting anything that would escape it.
///
/// The root itself is not touched; callers pass an already canonical root.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf, PathError> {
    if relative.contains('\0') {
        return Err(PathError::NullByte(relative.to_string()));
    }

    let (segments, escaped) = normalize_segments(relative);
    if escaped {
        return Err(PathError::Traversal(relative.to_string()));
    }

    let resolved = join_segments(root, &segments);
    debug!("Resolved {} to {}", relative, resolved.display());
    Ok(resolved)
}

/// Resolve `relative` under `root`, dropping any `..` that climbs above it.
///
/// Never fails; NUL bytes collapse the result to the root itself.
pub fn resolve_clamped(root: &Path, relative: &str) -> PathBuf {
    if relative.contains('\0') {
        return root.to_path_buf();
    }
    let (segments, _) = normalize_segments(relative);
    join_segments(root, &segments)
}

/// Canonical form of a root relative path.
///
/// Unifies separators, collapses repeats and drops `.` segments. A leading
/// and a trailing separator are kept when present, since the trailing one
/// marks a folder. `..` is left alone; [`resolve`] deals with it.
pub fn clean_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }

    let unified = path.replace('\\', "/");
    let leading = unified.starts_with('/');
    let trailing = unified.ends_with('/');

    let body = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if body.is_empty() {
        return if leading || trailing {
            "/".to_string()
        } else {
            String::new()
        };
    }

    let mut cleaned = String::with_capacity(body.len() + 2);
    if leading {
        cleaned.push('/');
    }
    cleaned.push_str(&body);
    if trailing {
        cleaned.push('/');
    }
    cleaned
}

/// Directory part of a relative path, `/` when there is none.
///
/// A trailing separator is ignored, so the parent of `/docs/` is `/`.
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &trimmed[..pos],
    }
}

/// Final segment of a path, ignoring a trailing separator.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Extension of the final segment, empty when there is none.
///
/// Folders (trailing separator) have no extension. Dotfiles such as
/// `.htaccess` count as having the extension `htaccess`.
pub fn extension(path: &str) -> &str {
    if path.ends_with('/') || path.ends_with('\\') {
        return "";
    }
    let name = basename(path);
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => "",
    }
}

/// Canonical `/` rooted form of a path already resolved under `root`.
///
/// Folders get a trailing separator, except for the root itself. Paths not
/// under `root` collapse to `/`.
pub fn root_relative(root: &Path, absolute: &Path, is_dir: bool) -> String {
    let Ok(rest) = absolute.strip_prefix(root) else {
        return "/".to_string();
    };

    let mut relative = String::from("/");
    for (i, component) in rest.components().enumerate() {
        if i > 0 {
            relative.push('/');
        }
        relative.push_str(&component.as_os_str().to_string_lossy());
    }
    if is_dir && relative.len() > 1 {
        relative.push('/');
    }
    relative
}

/// Check that an existing path is inside `root` once symlinks are resolved.
///
/// Missing paths are never within root.
pub fn is_within_root(root: &Path, path: &Path) -> bool {
    let Ok(canonical_root) = root.canonicalize() else {
        return false;
    };
    match path.canonicalize() {
        Ok(canonical_path) => canonical_path.starts_with(&canonical_root),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_joins_under_root() {
        let root = Path::new("/storage");
        assert_eq!(
            resolve(root, "/docs/a.txt").unwrap(),
            PathBuf::from("/storage/docs/a.txt")
        );
        assert_eq!(resolve(root, "/").unwrap(), PathBuf::from("/storage"));
        assert_eq!(resolve(root, "").unwrap(), PathBuf::from("/storage"));
    }

    #[test]
    fn test_resolve_normalizes_dots_and_separators() {
        let root = Path::new("/storage");
        assert_eq!(
            resolve(root, "//docs/./sub/../a.txt").unwrap(),
            PathBuf::from("/storage/docs/a.txt")
        );
        assert_eq!(
            resolve(root, "docs\\a.txt").unwrap(),
            PathBuf::from("/storage/docs/a.txt")
        );
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let root = Path::new("/storage");
        assert_eq!(
            resolve(root, "/secret/../../etc/passwd"),
            Err(PathError::Traversal("/secret/../../etc/passwd".into()))
        );
        assert!(resolve(root, "..").is_err());
        assert!(resolve(root, "/docs/..\\..\\x").is_err());
    }

    #[test]
    fn test_resolve_rejects_null_byte() {
        let root = Path::new("/storage");
        assert!(matches!(
            resolve(root, "/a\0.txt"),
            Err(PathError::NullByte(_))
        ));
    }

    #[test]
    fn test_resolve_never_leaves_root() {
        let root = Path::new("/storage");
        let hostile = [
            "../x",
            "/../../x",
            "/a/../../x",
            "/a/b/../../../x/y",
            "..\\..\\windows",
            "/./../",
        ];
        for relative in hostile {
            if let Ok(path) = resolve(root, relative) {
                assert!(path.starts_with(root), "{relative} escaped");
            }
            assert!(resolve_clamped(root, relative).starts_with(root));
        }
    }

    #[test]
    fn test_resolve_clamped_drops_excess_parents() {
        let root = Path::new("/storage");
        assert_eq!(
            resolve_clamped(root, "/secret/../../etc/passwd"),
            PathBuf::from("/storage/etc/passwd")
        );
        assert_eq!(resolve_clamped(root, "/a\0b"), PathBuf::from("/storage"));
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("//docs///a.txt"), "/docs/a.txt");
        assert_eq!(clean_path("/_thumbs//docs/"), "/_thumbs/docs/");
        assert_eq!(clean_path("/./docs/./"), "/docs/");
        assert_eq!(clean_path("docs\\sub\\a.txt"), "docs/sub/a.txt");
        assert_eq!(clean_path("///"), "/");
        assert_eq!(clean_path("  /docs  "), "/docs");
        assert_eq!(clean_path(""), "");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("/docs/a.txt"), "/docs");
        assert_eq!(dirname("/docs/sub/"), "/docs");
        assert_eq!(dirname("/docs/"), "/");
        assert_eq!(dirname("/a.txt"), "/");
        assert_eq!(dirname("/"), "/");
        assert_eq!(dirname("a.txt"), "/");
    }

    #[test]
    fn test_basename_and_extension() {
        assert_eq!(basename("/docs/a.txt"), "a.txt");
        assert_eq!(basename("/docs/sub/"), "sub");
        assert_eq!(extension("/docs/a.TXT"), "TXT");
        assert_eq!(extension("/docs/archive.tar.gz"), "gz");
        assert_eq!(extension("/docs/README"), "");
        assert_eq!(extension("/docs/v1.0/"), "");
        assert_eq!(extension("/.htaccess"), "htaccess");
    }

    #[test]
    fn test_root_relative_is_canonical() {
        let root = Path::new("/storage");
        for relative in [
            "/private/secret.txt",
            "//private/secret.txt",
            "private/secret.txt",
            "/./private/secret.txt",
            "/private/x/../secret.txt",
            "\\private\\secret.txt",
        ] {
            let absolute = resolve(root, relative).unwrap();
            assert_eq!(
                root_relative(root, &absolute, false),
                "/private/secret.txt",
                "{relative}"
            );
        }
        assert_eq!(root_relative(root, root, true), "/");
        assert_eq!(
            root_relative(root, &root.join("docs"), true),
            "/docs/"
        );
        assert_eq!(root_relative(root, Path::new("/elsewhere"), false), "/");
    }

    #[test]
    fn test_is_within_root_follows_symlinks() {
        let root = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), b"x").unwrap();
        fs::write(root.path().join("inside.txt"), b"x").unwrap();

        assert!(is_within_root(root.path(), &root.path().join("inside.txt")));
        assert!(!is_within_root(root.path(), &root.path().join("missing.txt")));

        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(outside.path(), root.path().join("link")).unwrap();
            assert!(!is_within_root(
                root.path(),
                &root.path().join("link").join("secret.txt")
            ));
        }
    }
}
