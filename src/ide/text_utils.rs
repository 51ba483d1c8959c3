//! Identifier extraction around a cursor offset.
//!
//! These helpers answer "what name is the cursor touching?" directly on
//! the document text, in the same byte-offset coordinates the rest of
//! the crate uses. A cursor counts as touching a name when it sits on
//! one of its characters or immediately after the last one, which is
//! where it lands while the author is typing.

use crate::base::{TextRange, TextSize};

/// Check if a character is part of an identifier.
///
/// Uses Unicode Standard Annex #31 continuation rules, matching what
/// the lexer accepts inside an identifier.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[inline]
fn is_dotted_name_character(c: char) -> bool {
    is_word_character(c) || c == '.'
}

/// Range of the identifier the cursor touches, in byte offsets.
///
/// `None` when the offset is out of range, not on a character boundary,
/// or touching no identifier character.
pub fn word_range_at(text: &str, offset: TextSize) -> Option<TextRange> {
    range_at(text, offset, is_word_character)
}

/// The identifier the cursor touches, e.g. `count` in `var count = 0;`.
pub fn word_at(text: &str, offset: TextSize) -> Option<&str> {
    word_range_at(text, offset).map(|range| &text[range])
}

/// The dotted name the cursor touches, e.g. `my.lib.Base` anywhere on
/// an `import my.lib.Base;` line.
///
/// A name without a dot is not a dotted name; use [`word_at`] for those.
/// Leading and trailing dots are trimmed so a half-typed `my.lib.` still
/// resolves to `my.lib`.
pub fn dotted_name_at(text: &str, offset: TextSize) -> Option<&str> {
    let range = range_at(text, offset, is_dotted_name_character)?;
    let trimmed = text[range].trim_matches('.');
    trimmed.contains('.').then_some(trimmed)
}

/// Expand from the cursor over characters matching `pred`.
///
/// Anchors on the character at `offset`, falling back to the one before
/// it so the position right after a name still matches.
fn range_at(text: &str, offset: TextSize, pred: fn(char) -> bool) -> Option<TextRange> {
    let at = usize::from(offset);
    if at > text.len() || !text.is_char_boundary(at) {
        return None;
    }

    let anchor = if text[at..].chars().next().is_some_and(pred) {
        at
    } else {
        let before = text[..at].chars().next_back()?;
        if !pred(before) {
            return None;
        }
        at - before.len_utf8()
    };

    let mut start = anchor;
    for (i, c) in text[..anchor].char_indices().rev() {
        if !pred(c) {
            break;
        }
        start = i;
    }

    let mut end = anchor;
    for (i, c) in text[anchor..].char_indices() {
        if !pred(c) {
            break;
        }
        end = anchor + i + c.len_utf8();
    }

    Some(TextRange::new(
        TextSize::new(start as u32),
        TextSize::new(end as u32),
    ))
}
