//! Package definitions as declared in the catalog

use serde::{Deserialize, Serialize};

/// A named, catalog-declared unit of installable files
///
/// Specs are immutable once loaded into a catalog. Field order of `files`
/// and `dependencies` is significant: files are fetched and dependencies are
/// spliced in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub name: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "deps")]
    pub dependencies: Vec<String>,
}

impl PackageSpec {
    /// Create a spec with no dependencies
    pub fn new(
        name: impl Into<String>,
        files: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            files: files.into_iter().map(Into::into).collect(),
            description: description.into(),
            dependencies: Vec::new(),
        }
    }

    /// Declare dependencies, replacing any existing ones
    #[must_use]
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the package declares any dependency
    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// Catalog entry cross-referenced with local install state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub files: Vec<String>,
    pub installed: bool,
}

impl PackageInfo {
    /// Build an info row for a spec
    #[must_use]
    pub fn from_spec(spec: &PackageSpec, installed: bool) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            dependencies: spec.dependencies.clone(),
            files: spec.files.clone(),
            installed,
        }
    }
}
