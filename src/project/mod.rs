//! Project-level concerns: configuration, library bootstrap, and
//! workspace loading.

mod cached_library;
pub mod config;
pub mod library_loader;
pub mod workspace_loader;

pub use cached_library::CachedLibrary;
pub use config::ProjectConfig;
pub use library_loader::LibraryLoader;
pub use workspace_loader::WorkspaceLoader;

// Re-export parse types for callers that report diagnostics
pub use crate::syntax::{ParseError, ParseResult};
