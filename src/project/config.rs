//! Project configuration: framework version and class library locations.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::debug;

use crate::base::constants::{DEFAULT_FRAMEWORK_VERSION, LIBRARY_DIR};

/// Where built-in class definitions come from and which framework
/// version's surface they should present.
#[derive(Clone, Debug)]
pub struct ProjectConfig {
    /// Target framework version; selects a versioned subdirectory of
    /// each library root when one exists.
    pub framework_version: SmolStr,
    /// Class library roots, searched in order.
    pub library_paths: Vec<PathBuf>,
}

impl ProjectConfig {
    /// Configuration with no library roots.
    pub fn new(framework_version: impl Into<SmolStr>) -> Self {
        Self {
            framework_version: framework_version.into(),
            library_paths: Vec::new(),
        }
    }

    /// Add a library root.
    pub fn with_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_paths.push(path.into());
        self
    }

    /// Configuration with automatic library discovery.
    ///
    /// Searches for the library in these locations (in order):
    /// 1. Next to the current executable (for installed binaries)
    /// 2. The crate manifest directory (for development and tests)
    /// 3. Current working directory
    pub fn discover() -> Self {
        let mut config = Self::new(DEFAULT_FRAMEWORK_VERSION);
        config.library_paths.push(discover_library_path());
        config
    }

    /// The directories actually scanned for class files: each library
    /// root, narrowed to its framework-version subdirectory when one
    /// exists.
    pub fn effective_library_paths(&self) -> Vec<PathBuf> {
        self.library_paths
            .iter()
            .map(|root| {
                let versioned = root.join(self.framework_version.as_str());
                if versioned.is_dir() {
                    versioned
                } else {
                    root.clone()
                }
            })
            .collect()
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::discover()
    }
}

/// Discover the library path by searching common locations.
///
/// Returns the first existing path, or falls back to the default.
fn discover_library_path() -> PathBuf {
    // Try next to the executable first (for installed binaries)
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let next_to_exe = exe_dir.join(LIBRARY_DIR);
        if next_to_exe.is_dir() {
            return next_to_exe;
        }
    }

    // Manifest directory for development and tests
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let in_manifest = PathBuf::from(&manifest_dir).join(LIBRARY_DIR);
        if in_manifest.is_dir() {
            debug!(path = %in_manifest.display(), "library found in manifest directory");
            return in_manifest;
        }
    }

    // Fall back to current directory / default path
    PathBuf::from(LIBRARY_DIR)
}
