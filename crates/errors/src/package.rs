//! Catalog and package definition error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PackageError {
    #[error("package not found: {name}")]
    NotFound { name: String },

    #[error("duplicate package in catalog: {name}")]
    Duplicate { name: String },

    #[error("invalid package name: {name:?}")]
    InvalidName { name: String },

    #[error("package {package} declares unsupported file entry {entry}: {reason}")]
    UnsupportedFileEntry {
        package: String,
        entry: String,
        reason: String,
    },

    #[error("package {package} depends on {dependency}, which is not in the catalog")]
    UnknownDependency { package: String, dependency: String },

    #[error("suite entry {name} is not in the catalog")]
    UnknownSuiteEntry { name: String },

    #[error("failed to read catalog {path}: {message}")]
    CatalogUnreadable { path: String, message: String },

    #[error("failed to parse catalog {path}: {message}")]
    CatalogParse { path: String, message: String },
}

impl UserFacingError for PackageError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedFileEntry { .. } => Some(
                "Glob patterns cannot be fetched; list each file explicitly in the catalog.",
            ),
            Self::CatalogParse { .. }
            | Self::Duplicate { .. }
            | Self::UnknownDependency { .. }
            | Self::UnknownSuiteEntry { .. } => {
                Some("Fix the catalog file referenced by [catalog] path.")
            }
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NotFound { .. } => "package.not_found",
            Self::Duplicate { .. } => "package.duplicate",
            Self::InvalidName { .. } => "package.invalid_name",
            Self::UnsupportedFileEntry { .. } => "package.unsupported_file_entry",
            Self::UnknownDependency { .. } => "package.unknown_dependency",
            Self::UnknownSuiteEntry { .. } => "package.unknown_suite_entry",
            Self::CatalogUnreadable { .. } => "package.catalog_unreadable",
            Self::CatalogParse { .. } => "package.catalog_parse",
        };
        Some(code)
    }
}
