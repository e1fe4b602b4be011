use dna_errors::{Error, PackageError};
use std::path::{Component, Path};

/// Characters that would make an entry a pattern rather than a file
const GLOB_CHARS: [char; 3] = ['*', '?', '['];

pub(crate) fn validate_name(name: &str) -> Result<(), Error> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(PackageError::InvalidName {
            name: name.to_string(),
        }
        .into())
    }
}

/// A file entry must be a plain relative path naming a single file
pub(crate) fn validate_file_entry(package: &str, entry: &str) -> Result<(), Error> {
    let reject = |reason: &str| -> Error {
        PackageError::UnsupportedFileEntry {
            package: package.to_string(),
            entry: entry.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if entry.trim().is_empty() {
        return Err(reject("empty path"));
    }
    if entry.contains(GLOB_CHARS) {
        return Err(reject("glob patterns are not supported"));
    }
    if entry.ends_with('/') {
        return Err(reject("path names a directory"));
    }

    let path = Path::new(entry);
    if path.is_absolute() || entry.starts_with('/') {
        return Err(reject("path must be relative"));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(reject("path must not contain `..`"));
    }
    if path.file_name().is_none() {
        return Err(reject("path has no file name"));
    }

    Ok(())
}
