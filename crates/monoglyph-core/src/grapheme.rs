#![forbid(unsafe_code)]

//! Text-unit helpers.
//!
//! A *unit* is one extended grapheme cluster: what a user perceives as a
//! single character. `"e\u{301}"` and `"👍🏽"` are one unit each even though
//! they span several `char`s.

use unicode_segmentation::UnicodeSegmentation;

/// Number of units in `text`.
#[must_use]
pub fn unit_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The first unit of `text`, or `""` when `text` is empty.
#[must_use]
pub fn first_unit(text: &str) -> &str {
    text.graphemes(true).next().unwrap_or("")
}

/// Split `text` into its first unit and the remaining units.
///
/// Returns `None` for empty input. The tail may be empty.
#[must_use]
pub fn split_first_unit(text: &str) -> Option<(&str, &str)> {
    let head = text.graphemes(true).next()?;
    Some(text.split_at(head.len()))
}
