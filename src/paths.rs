//! Import path resolution.
//!
//! Pure path manipulation, no filesystem I/O. Relative import paths are
//! interpreted against the directory of the file that declares them.

use std::path::{Path, PathBuf};

/// Resolve an import path against a base directory.
///
/// Absolute paths are returned unchanged. Relative paths are joined onto
/// `base_dir`; the result is not normalized and not checked for existence.
///
/// # Example
/// ```
/// use std::path::{Path, PathBuf};
/// use yaml_import::paths::resolve;
///
/// assert_eq!(
///     resolve(Path::new("/etc/app"), "db.yaml"),
///     PathBuf::from("/etc/app/db.yaml")
/// );
/// ```
pub fn resolve(base_dir: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// The resolution context for a document: the directory containing it.
///
/// A bare file name yields an empty path, which joins as the current
/// working directory.
pub fn base_dir_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
