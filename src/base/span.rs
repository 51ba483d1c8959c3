//! Source text positions and ranges.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
/// Columns count UTF-8 bytes, not characters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Create from 1-indexed line and column (as reported by external
    /// tools and displayed to users). Saturates at the origin.
    #[inline]
    pub const fn from_one_indexed(line: u32, col: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            col: col.saturating_sub(1),
        }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Index for converting between byte offsets and line/column positions.
///
/// Line breaks are `\n`, `\r\n`, and bare `\r`, so documents produced on
/// any platform index identically. Lookups are O(log n) over the
/// precomputed line-start table.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    /// Total length of the indexed text
    len: TextSize,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let bytes = text.as_bytes();

        for (offset, byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' => line_starts.push(TextSize::from((offset + 1) as u32)),
                // Bare \r is a break; \r\n is handled at the \n.
                b'\r' if bytes.get(offset + 1) != Some(&b'\n') => {
                    line_starts.push(TextSize::from((offset + 1) as u32));
                }
                _ => {}
            }
        }

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Returns `None` when the offset lies beyond the end of the text.
    /// The end-of-text offset itself is valid: it is where the cursor
    /// sits after the last character.
    pub fn line_col(&self, offset: TextSize) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }

        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = self.line_starts[line];
        let col = offset - line_start;

        Some(LineCol {
            line: line as u32,
            col: col.into(),
        })
    }

    /// Convert a line/column position to a byte offset.
    ///
    /// Returns `None` when the line does not exist or the column runs
    /// past the end of that line, so every `Some` result round-trips
    /// through [`LineIndex::line_col`].
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line = line_col.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let candidate = line_start + TextSize::from(line_col.col);

        if candidate > self.len {
            return None;
        }
        // A position at or past the next line start belongs to that line.
        if let Some(&next_start) = self.line_starts.get(line + 1) {
            if candidate >= next_start {
                return None;
            }
        }

        Some(candidate)
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Total length of the indexed text.
    pub fn len(&self) -> TextSize {
        self.len
    }
}

/// One-shot conversion of a byte offset into a line/column position.
///
/// Builds a transient [`LineIndex`]; callers translating many offsets
/// against the same text should hold an index instead.
pub fn offset_to_line_col(text: &str, offset: TextSize) -> Option<LineCol> {
    LineIndex::new(text).line_col(offset)
}
