//! Engagement parsing.
//!
//! Reaction and count strings come in free-text shapes ("42", "1,234
//! reactions", "Like: 12 people reacted"). Parsing never fails - no match
//! means the zero value.

use crate::patterns::FIRST_INTEGER;
use crate::records::Reactions;

/// Parse a free-text reaction string into [`Reactions`].
///
/// Thousands separators are stripped, then the first integer run becomes
/// `total`. Per-category counts are not derived from free text; callers with
/// structured per-category signals fill those in themselves.
#[must_use]
pub fn parse_reactions_text(text: &str) -> Reactions {
    if text.is_empty() {
        return Reactions::default();
    }

    let cleaned = text.replace(',', "");
    first_integer(&cleaned).map_or_else(Reactions::default, Reactions::with_total)
}

/// First integer run in a string, saturated to `u32::MAX` on overflow.
#[must_use]
pub fn first_integer(text: &str) -> Option<u32> {
    let digits = FIRST_INTEGER.find(text)?.as_str();
    match digits.parse::<u64>() {
        Ok(value) => Some(u32::try_from(value).unwrap_or(u32::MAX)),
        // more digits than u64 holds; nothing sane to report
        Err(_) => Some(u32::MAX),
    }
}
