//! Executable lookup over an explicit search path.

use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::ffi::OsStr;

/// Resolves `executable` to a runnable file.
///
/// Names containing a path separator are checked as given. Bare names are
/// looked up in each directory of `search_path` in order; entries that are
/// not valid UTF-8 are skipped.
#[must_use]
pub fn resolve_executable(executable: &str, search_path: Option<&OsStr>) -> Option<Utf8PathBuf> {
    let direct = Utf8Path::new(executable);
    if direct.components().count() > 1 {
        return is_executable_file(direct).then(|| direct.to_path_buf());
    }

    let path = search_path?;
    env::split_paths(path)
        .filter_map(|entry| Utf8PathBuf::from_path_buf(entry).ok())
        .map(|dir| dir.join(executable))
        .find(|candidate| is_executable_file(candidate))
}

#[cfg(unix)]
fn is_executable_file(path: &Utf8Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Utf8Path) -> bool {
    path.is_file()
}
