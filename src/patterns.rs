//! Compiled regex patterns and fixed vocabularies for field extraction.
//!
//! All patterns are compiled once at first use via `LazyLock`. The string
//! vocabularies are the chrome and noise markers the feed layouts emit; they
//! are matched exactly, so keep them byte-for-byte as the pages render them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Identifier patterns
// =============================================================================

/// `story_fbid` query parameter, for hrefs that do not parse as absolute URLs
/// (mbasic links are usually relative).
pub static STORY_FBID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]story_fbid=([^&#]+)").expect("STORY_FBID_PARAM regex"));

/// Numeric post id in a `/posts/<digits>` path segment.
pub static POSTS_PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/posts/(\d+)").expect("POSTS_PATH_ID regex"));

/// Opaque `pfbid` post token.
pub static PFBID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pfbid[a-zA-Z0-9]+").expect("PFBID_TOKEN regex"));

/// Numeric post id embedded in an mbasic `data-ft` attribute.
pub static TOP_LEVEL_POST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""top_level_post_id":"(\d+)""#).expect("TOP_LEVEL_POST_ID regex"));

// =============================================================================
// Engagement patterns
// =============================================================================

/// First integer run in a string (thousands separators stripped beforehand).
pub static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("FIRST_INTEGER regex"));

/// "All reactions:" header followed by a count on the same or next line.
pub static ALL_REACTIONS_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"All reactions:?\s*\n?(\d+)").expect("ALL_REACTIONS_COUNT regex"));

/// A standalone count line followed later by an "and N others"/"others" tail.
pub static OTHERS_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(\d+)\n.*(?:and \d+ others|others)").expect("OTHERS_COUNT regex"));

/// A count line with nothing else on it.
pub static STANDALONE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(\d+)\n").expect("STANDALONE_COUNT regex"));

/// Integer directly attached to a "comment" accessible label.
pub static COMMENT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*comment").expect("COMMENT_COUNT regex"));

// =============================================================================
// Content cleaning patterns
// =============================================================================

/// Bare relative-timestamp token ("6h", "3d", "2w", "45m").
pub static BARE_RELATIVE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[hdwm]$").expect("BARE_RELATIVE_TIME regex"));

/// Trailing "See more" expander, with optional ellipsis.
pub static SEE_MORE_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*…?\s*See more\s*$").expect("SEE_MORE_TRAILING regex"));

/// Leading "See more" expander, with optional ellipsis.
pub static SEE_MORE_LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*…?\s*See more\s*").expect("SEE_MORE_LEADING regex"));

// =============================================================================
// Vocabularies
// =============================================================================

/// Feed inserts that look like posts but carry no member content. The first
/// entry also appears with a BOM prefix in the rendered tree.
pub const FEED_NOISE_MARKERS: &[&str] = &[
    "People you may know",
    "\u{feff}People you may know",
    "Suggested for you",
    "Groups you might like",
];

/// Resolved "author" strings that are really UI state, not names.
pub const NON_AUTHOR_LABELS: &[&str] = &["Online status indicator", "Active", "Sponsored"];

/// Editorial suffixes appended to author headings; the name ends before them.
pub const AUTHOR_SPLIT_MARKERS: &[&str] = &[" is with ", " shared ", " updated "];

/// Action-row chrome around post content blocks.
pub const POST_CHROME: &[&str] = &["Like", "Comment", "Share", "Reply", "·"];

/// Chrome seen when scanning raw post text lines, including reaction chips.
pub const LINE_CHROME: &[&str] = &["Like", "Comment", "Share", "·", "+3", "+1", "+2"];

/// Chrome around comment content blocks.
pub const COMMENT_CHROME: &[&str] =
    &["Like", "Reply", "Share", "·", "See more", "View replies"];

/// Tokens whose presence makes a link's visible text worth trying as a
/// timestamp.
pub const TIME_UNIT_TOKENS: &[&str] = &["h", "d", "w", "min", "yesterday", "just now"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_relative_time_matches_tokens_only() {
        assert!(BARE_RELATIVE_TIME.is_match("6h"));
        assert!(BARE_RELATIVE_TIME.is_match("12d"));
        assert!(!BARE_RELATIVE_TIME.is_match("6 hours"));
        assert!(!BARE_RELATIVE_TIME.is_match("h6"));
    }

    #[test]
    fn see_more_trailing_with_ellipsis() {
        let cleaned = SEE_MORE_TRAILING.replace("Great recipe… See more", "");
        assert_eq!(cleaned, "Great recipe");
    }

    #[test]
    fn posts_path_id_ignores_non_numeric() {
        assert!(POSTS_PATH_ID.captures("/groups/g/posts/998877").is_some());
        assert!(POSTS_PATH_ID.captures("/groups/g/posts/abc").is_none());
    }

    #[test]
    fn others_count_requires_tail() {
        let text = "\n44\nAlice, Bob and 42 others";
        let caps = OTHERS_COUNT.captures(text);
        assert_eq!(caps.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("44"));
        assert!(OTHERS_COUNT.captures("\n44\nAlice, Bob").is_none());
    }
}
