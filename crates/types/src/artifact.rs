//! Routing of fetched files by artifact kind

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suffixes that mark a fetched file as data rather than something runnable
const DATA_SUFFIXES: &[&str] = &["dna"];

/// What a fetched file is, which decides where it lands locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Goes to the library directory and gets a short-named alias in `bin/`
    Executable,
    /// Goes to the organisms directory, no alias
    DataArtifact,
}

impl ArtifactKind {
    /// Classify a catalog file path by its suffix
    ///
    /// Matching is a case-sensitive suffix test on the base name, so
    /// `organism.dna` and a bare `.dna` are data while `organism.DNA`,
    /// `dna.py` and `dna` are not.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        let is_data = base_name(path).is_some_and(|name| {
            DATA_SUFFIXES
                .iter()
                .any(|suffix| name.strip_suffix(suffix).is_some_and(|rest| rest.ends_with('.')))
        });
        if is_data {
            Self::DataArtifact
        } else {
            Self::Executable
        }
    }

    /// Whether fetched files of this kind get an alias in the executables directory
    #[must_use]
    pub fn is_aliased(self) -> bool {
        matches!(self, Self::Executable)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Executable => write!(f, "executable"),
            Self::DataArtifact => write!(f, "data"),
        }
    }
}

/// Base name of a catalog path (`LambdaMaximizer/run_organism.py` → `run_organism.py`)
#[must_use]
pub fn base_name(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|n| n.to_str())
}

/// Alias name for a catalog path: base name without its extension
#[must_use]
pub fn alias_name(path: &str) -> Option<&str> {
    Path::new(path).file_stem().and_then(|n| n.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify() {
        assert_eq!(ArtifactKind::classify("z3bra_mesh.py"), ArtifactKind::Executable);
        assert_eq!(
            ArtifactKind::classify("LambdaMaximizer/organism.dna"),
            ArtifactKind::DataArtifact
        );
        assert_eq!(ArtifactKind::classify("dna"), ArtifactKind::Executable);
        assert_eq!(ArtifactKind::classify(".dna"), ArtifactKind::DataArtifact);
        assert_eq!(
            ArtifactKind::classify("LambdaMaximizer/.dna"),
            ArtifactKind::DataArtifact
        );
        assert_eq!(ArtifactKind::classify("organism.DNA"), ArtifactKind::Executable);
        assert_eq!(ArtifactKind::classify("a.bin"), ArtifactKind::Executable);
    }

    #[test]
    fn test_names() {
        assert_eq!(base_name("LambdaMaximizer/run_organism.py"), Some("run_organism.py"));
        assert_eq!(alias_name("LambdaMaximizer/run_organism.py"), Some("run_organism"));
        assert_eq!(alias_name("mesh_relay"), Some("mesh_relay"));
        assert_eq!(base_name(""), None);
    }

    proptest! {
        #[test]
        fn dna_suffix_is_always_data(stem in "[a-zA-Z0-9_/]{0,16}[a-zA-Z0-9_]") {
            let path = format!("{stem}.dna");
            prop_assert_eq!(ArtifactKind::classify(&path), ArtifactKind::DataArtifact);
        }

        #[test]
        fn other_suffixes_are_executable(stem in "[a-z0-9_]{1,12}", ext in "(py|sh|bin|rs)") {
            let path = format!("{stem}.{ext}");
            prop_assert_eq!(ArtifactKind::classify(&path), ArtifactKind::Executable);
            prop_assert!(ArtifactKind::classify(&path).is_aliased());
        }
    }
}
