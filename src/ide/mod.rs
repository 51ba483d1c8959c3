//! IDE features — High-level APIs for editor integrations.
//!
//! This module sits between the class model (HIR) and whatever editor
//! front end consumes it. Each entry point answers one editor question:
//! "which members are available here?", "what should completion offer?".
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the editor boundary
//! 3. **Composable**: Built on top of HIR queries
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use memberscope::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("Controller.cls", "package my.app; public class Controller {}");
//!
//! let analysis = host.analysis();
//! let members = analysis.fields_and_methods("Controller.cls", offset);
//! ```

mod analysis;
mod completion;
mod strategies;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use strategies::{
    InterfaceMemberStrategy, MemberStrategy, ParentMethodStrategy, StrategyContext,
    fields_and_methods_at,
};
pub use text_utils::{dotted_name_at, word_at};
