//! Foundation types for the memberscope engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Domain constants (file extension, synthetic class names)
//!
//! This module has NO dependencies on other memberscope modules.

pub mod constants;
mod span;

pub use span::{LineCol, LineIndex, TextRange, TextSize, offset_to_line_col};

// Re-export text-size types for convenience
pub use text_size;
