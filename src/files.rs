//! Path, naming and copy helpers for export and backup flows.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::error;

pub const APP_DIR_NAME: &str = "TowerCollector";

/// Failure kinds surfaced by [`check_access`], kept apart so callers can
/// report which step of preparing the target path went wrong.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("cannot create directory: {0}")]
    DirectoryMissing(PathBuf),
    #[error("cannot make directory writable: {0}")]
    DirectoryNotWritable(PathBuf),
    #[error("cannot make existing file writable: {0}")]
    FileNotWritable(PathBuf),
}

pub fn combine_path(base: impl AsRef<Path>, segment: impl AsRef<Path>) -> PathBuf {
    base.as_ref().join(segment)
}

/// Export directory under the given storage root. Not created here.
pub fn storage_app_dir(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join(APP_DIR_NAME)
}

/// Export directory under the platform storage root, taken from the
/// `EXTERNAL_STORAGE` variable with the working directory as fallback.
pub fn external_storage_app_dir() -> PathBuf {
    let root = dotenvy::var("EXTERNAL_STORAGE").unwrap_or_else(|_| String::from("."));
    storage_app_dir(root)
}

/// File name for the local wall-clock time, see [`file_name_at`].
pub fn current_file_name(suffix: &str, extension: &str) -> String {
    file_name_at(Local::now(), suffix, extension)
}

/// `2024-05-03-07-09-01<suffix>.<extension>`. Digits only, so the result
/// sorts chronologically and never depends on the runtime locale.
pub fn file_name_at(at: DateTime<Local>, suffix: &str, extension: &str) -> String {
    format!("{}{}.{}", at.format("%Y-%m-%d-%H-%M-%S"), suffix, extension)
}

// 'archive.tar.gz' -> Some("gz")
// '/path/to.a/file' -> None
// '/root/case/g.txt' -> Some("txt")
// '/root/case/g.txt.gg' -> Some("gg")
// '/root/case/g.txt.gg/' -> None
// '.htaccess', '/.htaccess', '/s/.htaccess' -> Some("htaccess")
pub fn file_extension(path: &str) -> Option<&str> {
    let dot = path.rfind('.')?;
    match path.rfind(['/', '\\']) {
        Some(sep) if dot < sep => None,
        _ => Some(&path[dot + 1..]),
    }
}

/// Best-effort byte copy for export and backup flows. Failures are logged
/// and reported as `false`; both handles are dropped on every path.
pub fn copy_file(src: &Path, dst: &Path) -> bool {
    match try_copy(src, dst) {
        Ok(_) => true,
        Err(e) => {
            error!(
                "failed to copy {} to {}: {e}",
                src.display(),
                dst.display()
            );
            false
        }
    }
}

fn try_copy(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut src = File::open(src)?;
    let mut dst = File::create(dst)?;
    io::copy(&mut src, &mut dst)
}

/// Ensures `path` can be written: creates the missing parent directory
/// tree, makes the directory writable if it is not, and makes the target
/// itself writable when it already exists. Calling this again on a valid
/// path changes nothing.
pub fn check_access(path: &Path) -> Result<(), AccessError> {
    let dir = match path.parent() {
        Some(x) if !x.as_os_str().is_empty() => x,
        _ => Path::new("."),
    };
    if !dir.exists() && fs::create_dir_all(dir).is_err() {
        return Err(AccessError::DirectoryMissing(dir.to_path_buf()));
    }
    if !is_writable(dir) && !make_writable(dir) {
        return Err(AccessError::DirectoryNotWritable(dir.to_path_buf()));
    }
    if path.exists() && !is_writable(path) && !make_writable(path) {
        return Err(AccessError::FileNotWritable(path.to_path_buf()));
    }
    Ok(())
}

fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|x| !x.permissions().readonly())
        .unwrap_or(false)
}

fn make_writable(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    let mut permissions = metadata.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions).is_ok() && is_writable(path)
}
