//! Domain records produced by extraction.
//!
//! These are plain value types: an extractor builds a record once from a
//! document-tree node and nothing mutates it afterwards. The comment filter
//! rebuilds comment trees rather than editing them in place. Serde derives
//! exist for the export layer, which owns persistence and upserts by `id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel author name used when no author could be resolved.
///
/// Kept as a literal string (not an `Option`) because downstream consumers
/// compare against it.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Author of a post or comment.
///
/// Purely descriptive - there is no identity beyond name and profile URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name, or [`UNKNOWN_AUTHOR`] when unresolved.
    pub name: String,

    /// Profile URL, when a profile link was found.
    pub profile_url: Option<String>,
}

impl Author {
    /// Author with a resolved name and optional profile link.
    #[must_use]
    pub fn new(name: impl Into<String>, profile_url: Option<String>) -> Self {
        Self { name: name.into(), profile_url }
    }

    /// The unresolved-author sentinel.
    #[must_use]
    pub fn unknown() -> Self {
        Self { name: UNKNOWN_AUTHOR.to_string(), profile_url: None }
    }

    /// Whether this is the unresolved-author sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_AUTHOR
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Reaction counts for a post or comment.
///
/// Only `total` is reliably populated by heuristic parsing; the per-category
/// breakdown is filled in opportunistically when a structured signal exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    pub total: u32,
    pub like: u32,
    pub love: u32,
    pub haha: u32,
    pub wow: u32,
    pub sad: u32,
    pub angry: u32,
}

impl Reactions {
    /// Reactions with only the total populated.
    #[must_use]
    pub fn with_total(total: u32) -> Self {
        Self { total, ..Self::default() }
    }
}

/// A single group post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique within one scrape. Either resolved from a permalink or
    /// synthesized from a content hash; never empty.
    pub id: String,

    /// Post author, when one could be resolved.
    pub author: Option<Author>,

    /// Post text. Extractors never emit a post with empty content.
    pub content: String,

    /// Absolute publication time, when one could be parsed.
    pub timestamp: Option<DateTime<Utc>>,

    pub reactions: Reactions,

    /// Comment count as advertised by the page, independent of how many
    /// comments were actually extracted into `comments`.
    pub comments_count: u32,

    /// Root-level comments in document order.
    pub comments: Vec<Comment>,
}

/// A comment on a post, possibly with nested replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique within one scrape; never empty.
    pub id: String,

    pub author: Option<Author>,

    /// Comment text. Extractors never emit a comment with empty content.
    pub content: String,

    pub timestamp: Option<DateTime<Utc>>,

    pub reactions: Reactions,

    /// Nested replies in document order, forming a tree of unbounded depth.
    pub replies: Vec<Comment>,
}

/// The group a scrape was taken from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Inclusive date window a scrape covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

/// Everything one scrape produced, assembled by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub group: GroupInfo,
    pub scraped_at: DateTime<Utc>,
    pub date_range: DateRange,
    pub posts: Vec<Post>,
}
