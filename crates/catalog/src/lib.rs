#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Package catalog for dna
//!
//! The catalog is static configuration: a flat, ordered mapping from package
//! name to files, description and dependencies, plus the full-suite list.
//! It comes either from the built-in set or from a TOML/JSON file.

mod builtin;
mod models;
mod validate;

pub use builtin::{builtin, FULL_SUITE};
pub use models::{Catalog, CatalogFile};

use dna_errors::{Error, PackageError};
use std::path::Path;

impl Catalog {
    /// Parse a TOML catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogParse` for malformed TOML, or a validation error.
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, Error> {
        let file: CatalogFile = toml::from_str(source).map_err(|e| PackageError::CatalogParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::try_from(file)
    }

    /// Parse a JSON catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogParse` for malformed JSON, or a validation error.
    pub fn from_json_str(source: &str, origin: &str) -> Result<Self, Error> {
        let file: CatalogFile =
            serde_json::from_str(source).map_err(|e| PackageError::CatalogParse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Self::try_from(file)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as TOML
    ///
    /// # Errors
    ///
    /// Returns `CatalogUnreadable` if the file cannot be read, otherwise any
    /// parse or validation error.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let origin = path.display().to_string();
        let source =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| PackageError::CatalogUnreadable {
                    path: origin.clone(),
                    message: e.to_string(),
                })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_str(&source, &origin)?
        } else {
            Self::from_toml_str(&source, &origin)?
        };
        tracing::debug!(path = %origin, packages = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Load from an optional path, falling back to the built-in catalog
    ///
    /// # Errors
    ///
    /// Returns any error from [`Catalog::load_from_file`].
    pub async fn load_or_builtin(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load_from_file(path).await,
            None => Ok(builtin()),
        }
    }
}
