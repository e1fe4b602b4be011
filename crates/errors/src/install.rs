//! Installation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum InstallError {
    #[error("unknown package: {package}")]
    UnknownPackage { package: String },

    #[error("circular dependency detected: {packages}")]
    CircularDependency { packages: String },

    #[error("failed to fetch {path}: {message}")]
    FetchFailed { path: String, message: String },

    #[error("filesystem operation failed: {operation} on {path}: {message}")]
    FilesystemError {
        operation: String,
        path: String,
        message: String,
    },

    #[error("invalid file entry {path}: {message}")]
    InvalidFileEntry { path: String, message: String },
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownPackage { .. } => Some("Run `dna list` to see available packages."),
            Self::CircularDependency { .. } => {
                Some("Fix the dependency declarations in the package catalog.")
            }
            Self::FetchFailed { .. } => Some("Check mesh connectivity with `dna status`."),
            Self::FilesystemError { .. } => {
                Some("Ensure the dna home directory exists and is writable.")
            }
            Self::InvalidFileEntry { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnknownPackage { .. } => "install.unknown_package",
            Self::CircularDependency { .. } => "install.circular_dependency",
            Self::FetchFailed { .. } => "install.fetch_failed",
            Self::FilesystemError { .. } => "install.filesystem_error",
            Self::InvalidFileEntry { .. } => "install.invalid_file_entry",
        };
        Some(code)
    }
}
