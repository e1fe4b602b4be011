//! Fixed names and defaults shared by every dna component
//!
//! Only the base directory is configurable; the layout below it is fixed so
//! that aliases in `bin/` keep pointing at the right files across releases.

/// Directory created under the user's home when no base directory is configured
pub const HOME_DIR_NAME: &str = ".dna";

pub const LIB_DIR: &str = "lib";
pub const BIN_DIR: &str = "bin";
pub const ORGANISMS_DIR: &str = "organisms";
pub const LOGS_DIR: &str = "logs";

/// State file at the root of the base directory
pub const STATE_FILE: &str = "config.json";

/// Private mesh node tried first
pub const LOCAL_REGISTRY: &str = "http://192.168.1.103:8000";

/// Public mirror used when the private mesh is unreachable
pub const PUBLIC_REGISTRY: &str =
    "https://raw.githubusercontent.com/ENKI-420/dna-lang-pkg-mgr/main/packages";

/// Suite version recorded by a global install when none is given
pub const DEFAULT_SUITE_VERSION: &str = "omega51.843";

/// Endpoints used when neither the state file nor the config names any
#[must_use]
pub fn default_endpoints() -> Vec<String> {
    vec![LOCAL_REGISTRY.to_string(), PUBLIC_REGISTRY.to_string()]
}
