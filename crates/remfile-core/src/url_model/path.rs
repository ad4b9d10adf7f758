//! Canonical paths and storage-root containment.

use std::path::{Component, Path, PathBuf};

/// Resolves `path` to an absolute path with symlinks, `.` and `..` resolved.
///
/// Unlike `fs::canonicalize`, a path that does not exist (yet) still resolves:
/// the existing prefix is canonicalized and the remaining components are
/// normalized lexically.
pub fn realpath(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => {
                out.push(part);
                // `out` is already canonical, so only the last hop can be a symlink.
                if let Ok(resolved) = std::fs::canonicalize(&out) {
                    out = resolved;
                }
            }
        }
    }
    out
}

/// True when `path` resolves to `root` or somewhere below it.
///
/// Compares whole components, so `/srv/files-evil` is not inside `/srv/files`.
pub fn is_within(root: &Path, path: &Path) -> bool {
    realpath(path).starts_with(realpath(root))
}
