use std::path::PathBuf;

use tracing::warn;

use crate::ide::AnalysisHost;
use crate::project::library_loader::collect_class_files;

/// Loads workspace files on demand
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads all class files from a directory into an AnalysisHost.
    ///
    /// Parse diagnostics do not fail the load; the registry keeps what
    /// it could recognize. Unreadable files do.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), String> {
        let path = path.into();
        if !path.is_dir() {
            return Err(format!("Directory not found: {}", path.display()));
        }

        let mut errors = Vec::new();
        for file in collect_class_files(&path) {
            match std::fs::read_to_string(&file) {
                Ok(text) => {
                    let diagnostics = host.set_file_content(&file.to_string_lossy(), &text);
                    if !diagnostics.is_empty() {
                        warn!(
                            path = %file.display(),
                            count = diagnostics.len(),
                            "workspace file has parse errors"
                        );
                    }
                }
                Err(e) => {
                    errors.push(format!("{}: {}", file.display(), e));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ))
        }
    }

    /// Loads a single file into an AnalysisHost.
    pub fn load_file_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), String> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        host.set_file_content(&path.to_string_lossy(), &text);
        Ok(())
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}
