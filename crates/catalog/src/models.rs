//! Catalog data model

use crate::validate::{validate_file_entry, validate_name};
use dna_errors::{Error, PackageError};
use dna_types::PackageSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// On-disk catalog layout shared by the TOML and JSON forms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Full-suite install order; omitted means every package in order
    #[serde(default)]
    pub suite: Vec<String>,
    #[serde(default, alias = "package")]
    pub packages: Vec<PackageSpec>,
}

/// Ordered, validated set of package specs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    packages: Vec<PackageSpec>,
    suite: Vec<String>,
}

impl Catalog {
    /// Build a catalog, validating every entry
    ///
    /// Every declared dependency must name a catalog package. Cycles are
    /// allowed here and rejected by the installer before anything is fetched.
    ///
    /// # Errors
    ///
    /// Returns a `PackageError` for empty or duplicate names, unsupported file
    /// entries, dependencies or suite entries that are not catalog names.
    pub fn new(packages: Vec<PackageSpec>, suite: Vec<String>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for spec in &packages {
            validate_name(&spec.name)?;
            if !seen.insert(spec.name.as_str()) {
                return Err(PackageError::Duplicate {
                    name: spec.name.clone(),
                }
                .into());
            }
            for entry in &spec.files {
                validate_file_entry(&spec.name, entry)?;
            }
        }

        for spec in &packages {
            if let Some(missing) = spec
                .dependencies
                .iter()
                .find(|dep| !seen.contains(dep.as_str()))
            {
                return Err(PackageError::UnknownDependency {
                    package: spec.name.clone(),
                    dependency: missing.clone(),
                }
                .into());
            }
        }

        for name in &suite {
            if !seen.contains(name.as_str()) {
                return Err(PackageError::UnknownSuiteEntry { name: name.clone() }.into());
            }
        }

        let suite = if suite.is_empty() {
            packages.iter().map(|p| p.name.clone()).collect()
        } else {
            suite
        };

        Ok(Self { packages, suite })
    }

    pub(crate) fn from_trusted(packages: Vec<PackageSpec>, suite: Vec<String>) -> Self {
        Self { packages, suite }
    }

    /// Look up a package by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageSpec> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Look up a package, failing with `NotFound`
    ///
    /// # Errors
    ///
    /// Returns `PackageError::NotFound` if the name is not in the catalog.
    pub fn require(&self, name: &str) -> Result<&PackageSpec, Error> {
        self.get(name).ok_or_else(|| {
            PackageError::NotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Packages in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &PackageSpec> {
        self.packages.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.name.as_str())
    }

    /// Full-suite install order
    #[must_use]
    pub fn suite(&self) -> &[String] {
        &self.suite
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = Error;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Self::new(file.packages, file.suite)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PackageSpec;
    type IntoIter = std::slice::Iter<'a, PackageSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
