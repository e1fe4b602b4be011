#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Filesystem operations for dna
//!
//! Thin async wrappers over `tokio::fs` that map failures into
//! [`StorageError`] with the offending path attached. Writes land through a
//! temporary sibling and a rename so readers never observe a half-written
//! file.

use dna_errors::{Error, StorageError};
use std::path::{Path, PathBuf};
use tokio::{fs, task};

/// Result type for filesystem operations
type Result<T> = std::result::Result<T, Error>;

/// Permission bits applied to spliced sources
pub const EXECUTABLE_MODE: u32 = 0o755;

fn storage_err(err: &std::io::Error, path: &Path) -> Error {
    StorageError::from_io_with_path(err, path).into()
}

/// Temporary sibling used for atomic writes
fn temp_sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!(".{suffix}-{}", std::process::id()));
    path.with_file_name(name)
}

/// Create a directory with all parent directories
///
/// # Errors
///
/// Returns an error if permission is denied or any I/O operation fails
/// during directory creation.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| storage_err(&e, path))
}

/// Rename a file or directory
///
/// # Errors
///
/// Returns an error if the rename fails (permissions, cross-device, etc.)
pub async fn rename(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).await.map_err(|e| {
        StorageError::AtomicRenameFailed {
            message: format!("{} -> {}: {e}", src.display(), dst.display()),
        }
        .into()
    })
}

/// Remove a single file
///
/// # Errors
///
/// Returns an error if the removal fails (permissions, file not found, etc.)
pub async fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .await
        .map_err(|e| storage_err(&e, path))
}

/// Remove a directory and all its contents
///
/// # Errors
///
/// Returns an error if the removal fails.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    fs::remove_dir_all(path)
        .await
        .map_err(|e| storage_err(&e, path))
}

/// Write `contents` to `path`, replacing any previous file
///
/// The bytes go to a temporary sibling first which is then renamed over the
/// destination. Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the parent cannot be created, the temporary file
/// cannot be written, or the final rename fails. The temporary file is
/// removed on failure.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).await?;
    }

    let tmp = temp_sibling(path, "tmp");
    if let Err(e) = fs::write(&tmp, contents).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(storage_err(&e, &tmp));
    }

    if let Err(e) = rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }

    Ok(())
}

/// Set permission bits on a path
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
#[cfg(unix)]
pub async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .map_err(|e| storage_err(&e, path))
}

/// Set permission bits on a path (no-op where modes do not exist)
///
/// # Errors
///
/// Never fails on this platform.
#[cfg(not(unix))]
pub async fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn symlink_inner(target: &Path, link: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::symlink;

    if let Some(parent) = link.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if let Ok(metadata) = std::fs::symlink_metadata(link) {
        if metadata.file_type().is_dir() {
            std::fs::remove_dir_all(link)?;
        } else {
            std::fs::remove_file(link)?;
        }
    }

    symlink(target, link)
}

/// Create a symbolic link, removing whatever occupied `link` before
///
/// # Errors
///
/// Returns an error if:
/// - Creating parent directories fails
/// - Removing a pre-existing path at the link location fails
/// - The symlink creation itself fails
#[cfg(unix)]
pub async fn symlink(target: &Path, link: &Path) -> Result<()> {
    let target_buf = target.to_path_buf();
    let link_buf = link.to_path_buf();

    task::spawn_blocking(move || symlink_inner(&target_buf, &link_buf))
        .await
        .map_err(|e| {
            Error::from(StorageError::IoError {
                message: format!("symlink task failed: {e}"),
            })
        })?
        .map_err(|e| storage_err(&e, link))
}

/// Create a symbolic link (not supported on non-Unix platforms).
///
/// # Errors
///
/// Always fails on this platform.
#[cfg(not(unix))]
pub async fn symlink(_target: &Path, link: &Path) -> Result<()> {
    Err(StorageError::InvalidPath {
        path: format!("{}: symlinks are not supported here", link.display()),
    }
    .into())
}

/// Point `link` at `target`, replacing any previous entry
///
/// A temporary link is created next to `link` and renamed into place so the
/// alias never disappears for an existing symlink or file. A real directory
/// at `link` is removed first since rename cannot replace it.
///
/// # Errors
///
/// Returns an error if the temporary link cannot be created or swapped in.
pub async fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).await?;
    }

    if let Ok(metadata) = fs::symlink_metadata(link).await {
        if metadata.file_type().is_dir() {
            remove_dir_all(link).await?;
        }
    }

    let temp_link = temp_sibling(link, "link");
    symlink(target, &temp_link).await?;

    if let Err(e) = rename(&temp_link, link).await {
        let _ = fs::remove_file(&temp_link).await;
        return Err(e);
    }
    Ok(())
}
