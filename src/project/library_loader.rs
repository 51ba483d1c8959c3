//! Loads the bundled class library into an analysis host at startup.

use std::path::PathBuf;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::ide::AnalysisHost;
use crate::project::ProjectConfig;
use crate::syntax::is_class_file;

/// Loads built-in class definitions from the configured library roots.
pub struct LibraryLoader {
    config: ProjectConfig,
    /// Track if the library has been loaded (for lazy loading)
    loaded: bool,
}

impl LibraryLoader {
    /// Creates a loader with automatic library discovery.
    pub fn new() -> Self {
        Self::with_config(ProjectConfig::discover())
    }

    /// Creates a loader for a specific configuration.
    pub fn with_config(config: ProjectConfig) -> Self {
        Self {
            config,
            loaded: false,
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Returns true if the library has been loaded by this loader
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Ensures the library is loaded into an AnalysisHost - loads only
    /// if not already loaded.
    ///
    /// Returns `Ok(true)` if the library was loaded, `Ok(false)` if
    /// already loaded.
    pub fn ensure_loaded_into_host(&mut self, host: &mut AnalysisHost) -> Result<bool, String> {
        if self.loaded {
            return Ok(false);
        }

        self.load_into_host(host)?;
        self.loaded = true;
        Ok(true)
    }

    /// Loads every class file under the configured library roots into
    /// an AnalysisHost. Returns the number of files loaded.
    ///
    /// Files that fail to read are errors; files that parse with
    /// diagnostics are kept (the registry degrades them to whatever was
    /// recognizable) and logged.
    pub fn load_into_host(&self, host: &mut AnalysisHost) -> Result<usize, String> {
        let roots = self.config.effective_library_paths();
        let existing: Vec<PathBuf> = roots.into_iter().filter(|p| p.is_dir()).collect();
        if existing.is_empty() {
            return Err(format!(
                "class library not found; searched: {}",
                self.config
                    .library_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        let mut read_errors = Vec::new();
        let mut loaded = 0usize;
        for root in &existing {
            for path in collect_class_files(root) {
                let text = match std::fs::read_to_string(&path) {
                    Ok(text) => text,
                    Err(e) => {
                        read_errors.push(format!("{}: {}", path.display(), e));
                        continue;
                    }
                };
                let errors = host.set_file_content(&path.to_string_lossy(), &text);
                if !errors.is_empty() {
                    warn!(
                        path = %path.display(),
                        count = errors.len(),
                        "library file has parse errors"
                    );
                }
                loaded += 1;
            }
        }
        debug!(files = loaded, "class library loaded");

        if read_errors.is_empty() {
            Ok(loaded)
        } else {
            Err(format!(
                "Failed to load {} library file(s):\n  {}",
                read_errors.len(),
                read_errors.join("\n  ")
            ))
        }
    }
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Class files under `root`, in a stable order.
pub(crate) fn collect_class_files(root: &std::path::Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_class_file(path))
        .collect()
}
