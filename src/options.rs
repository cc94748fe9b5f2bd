//! Configuration options for a scrape.
//!
//! All fields are public for easy configuration. Use `Default::default()`
//! for standard settings.
//!
//! # Example
//!
//! ```rust
//! use gleaner::Options;
//!
//! // Use defaults
//! let options = Options::default();
//!
//! // Customize specific fields
//! let options = Options {
//!     top_comments: 5,
//!     min_comment_reactions: 2,
//!     ..Options::default()
//! };
//! ```

use chrono::NaiveDate;

/// Configuration options for document-level extraction.
#[derive(Debug, Clone)]
pub struct Options {
    /// Size of the date window when `since`/`until` are not given, counted
    /// back from now.
    ///
    /// Default: `7`
    pub days: i64,

    /// Explicit start of the date window. Overrides `days`.
    ///
    /// Default: `None`
    pub since: Option<NaiveDate>,

    /// Explicit end of the date window.
    ///
    /// Default: `None`
    pub until: Option<NaiveDate>,

    /// Maximum number of posts to extract from one document (0 = unlimited).
    ///
    /// Default: `0`
    pub max_posts: usize,

    /// Do not walk comment nodes at all.
    ///
    /// Default: `false`
    pub skip_comments: bool,

    /// Drop extracted comments with fewer total reactions than this
    /// (0 = keep all). Applied recursively to replies.
    ///
    /// Default: `0`
    pub min_comment_reactions: u32,

    /// Keep only the N most-reacted comments per level (0 = keep all).
    /// Applied recursively to replies.
    ///
    /// Default: `0`
    pub top_comments: usize,

    /// Author names to treat as unresolved during extraction.
    ///
    /// Matched exactly against the resolved name, on top of the built-in
    /// non-author labels. Useful for group-specific bots or page badges.
    ///
    /// Default: `None`
    pub author_blacklist: Option<Vec<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            days: 7,
            since: None,
            until: None,
            max_posts: 0,
            skip_comments: false,
            min_comment_reactions: 0,
            top_comments: 0,
            author_blacklist: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.days, 7);
        assert!(opts.since.is_none());
        assert!(opts.until.is_none());
        assert_eq!(opts.max_posts, 0);
        assert!(!opts.skip_comments);
        assert_eq!(opts.min_comment_reactions, 0);
        assert_eq!(opts.top_comments, 0);
        assert!(opts.author_blacklist.is_none());
    }

    #[test]
    fn test_custom_options() {
        let opts = Options {
            days: 14,
            max_posts: 50,
            skip_comments: true,
            min_comment_reactions: 10,
            top_comments: 5,
            ..Options::default()
        };

        assert_eq!(opts.days, 14);
        assert_eq!(opts.max_posts, 50);
        assert!(opts.skip_comments);
        assert_eq!(opts.min_comment_reactions, 10);
        assert_eq!(opts.top_comments, 5);
    }
}
