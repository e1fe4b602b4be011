//! Local directory layout rooted at one base directory

use crate::constants::{BIN_DIR, HOME_DIR_NAME, LIB_DIR, LOGS_DIR, ORGANISMS_DIR, STATE_FILE};
use dna_errors::{ConfigError, Error};
use std::path::{Path, PathBuf};

/// Every path the client touches, derived from a single base directory
///
/// Components receive this value at construction instead of looking up the
/// user's home themselves, so a test can point the whole client at a
/// temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaPaths {
    home: PathBuf,
}

impl DnaPaths {
    /// Layout rooted at `home`
    ///
    /// A relative `home` is resolved against the current directory, so alias
    /// links written under it point at absolute targets.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let home = std::path::absolute(&home).unwrap_or(home);
        Self { home }
    }

    /// Layout rooted at `~/.dna`
    ///
    /// # Errors
    ///
    /// Returns an error if the user's home directory cannot be determined.
    pub fn user_default() -> Result<Self, Error> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(Self::new(home.join(HOME_DIR_NAME)))
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Fetched executables
    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.home.join(LIB_DIR)
    }

    /// Short-named aliases pointing into the library directory
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join(BIN_DIR)
    }

    /// Fetched data artifacts
    #[must_use]
    pub fn organisms_dir(&self) -> PathBuf {
        self.home.join(ORGANISMS_DIR)
    }

    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.home.join(LOGS_DIR)
    }

    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.home.join(STATE_FILE)
    }

    /// Directories that must exist before any file is fetched
    #[must_use]
    pub fn install_dirs(&self) -> [PathBuf; 4] {
        [
            self.home.clone(),
            self.lib_dir(),
            self.bin_dir(),
            self.organisms_dir(),
        ]
    }
}
