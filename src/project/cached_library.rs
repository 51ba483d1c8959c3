//! Cached class library for fast test setup.
//!
//! Loading the bundled library means reading and parsing every class
//! file it ships. Doing that per test adds up, so this module parses
//! the library once into an `AnalysisHost` and hands out clones (or a
//! shared `Arc`) afterwards.
//!
//! # Usage
//!
//! ```ignore
//! use memberscope::project::CachedLibrary;
//!
//! // First call reads and parses the library, subsequent calls clone
//! let host = CachedLibrary::analysis_host();
//! ```

use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use rayon::prelude::*;

use crate::ide::AnalysisHost;
use crate::project::ProjectConfig;
use crate::project::library_loader::collect_class_files;
use crate::syntax::parse_class_file;

/// Pre-built AnalysisHost with the library loaded, wrapped in Arc for
/// cheap sharing.
struct CachedHost {
    host: Arc<AnalysisHost>,
}

impl CachedHost {
    /// Read and parse all library files, then build the host.
    fn load(config: &ProjectConfig) -> Self {
        let mut host = AnalysisHost::new();

        let file_paths: Vec<PathBuf> = config
            .effective_library_paths()
            .iter()
            .filter(|root| root.is_dir())
            .flat_map(|root| collect_class_files(root))
            .collect();

        // Parse files in parallel; registration stays sequential.
        let parsed: Vec<_> = file_paths
            .par_iter()
            .filter_map(|path| {
                let text = std::fs::read_to_string(path).ok()?;
                let decl = parse_class_file(&text).content.and_then(|file| file.class);
                Some((path.clone(), Arc::<str>::from(text.as_str()), decl))
            })
            .collect();

        for (path, text, decl) in parsed {
            host.set_parsed_file(path, text, decl);
        }

        Self {
            host: Arc::new(host),
        }
    }
}

/// Global cached AnalysisHost with the library - built once on first access.
static CACHED_HOST: LazyLock<CachedHost> =
    LazyLock::new(|| CachedHost::load(&ProjectConfig::discover()));

/// Cached class library for fast test setup.
///
/// ## Usage Recommendations
///
/// - For read-only library queries, use `analysis_host_arc()`
/// - For tests that add user files, use `analysis_host()` (pays clone cost once)
/// - For tests that don't need the library at all, don't use this module
pub struct CachedLibrary;

impl CachedLibrary {
    /// Get a clone of the cached AnalysisHost with the library loaded.
    ///
    /// Use `analysis_host_arc()` instead when read access is enough.
    pub fn analysis_host() -> AnalysisHost {
        (*CACHED_HOST.host).clone()
    }

    /// Get a reference to the cached AnalysisHost (for read-only operations).
    ///
    /// This just clones an Arc reference.
    pub fn analysis_host_arc() -> Arc<AnalysisHost> {
        CACHED_HOST.host.clone()
    }

    /// Load the cached library into an existing AnalysisHost.
    pub fn load_into(host: &mut AnalysisHost) {
        host.extend_from(&CACHED_HOST.host);
    }

    /// Get the number of cached files (for diagnostics).
    pub fn file_count() -> usize {
        CACHED_HOST.host.file_count()
    }
}
