//! # memberscope
//!
//! Member resolution for class-based scripts: class model, inheritance
//! analysis, and cursor-aware completion strategies.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Configuration, built-in library loading
//!   ↓
//! ide       → Analysis host, resolution strategies, completion items
//!   ↓
//! hir       → Class model, registry, effective-member queries
//!   ↓
//! syntax    → Logos lexer, class-file parser, ParseError/ParseResult
//!   ↓
//! base      → Primitives (constants, LineCol/LineIndex, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → hir → ide → project)
// ============================================================================

/// Foundation types: domain constants, line/column conversion, TextRange
pub mod base;

/// Syntax: Logos lexer, class-file parser, ParseError/ParseResult
pub mod syntax;

/// Class model: ClassNode/Member, registry, inherited-member queries
pub mod hir;

/// IDE surface: AnalysisHost, resolution strategies, completion items
pub mod ide;

/// Project management: configuration, built-in library loading
pub mod project;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize, offset_to_line_col};
