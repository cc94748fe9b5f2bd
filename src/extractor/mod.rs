//! Record extractors.
//!
//! Two extractor families share one output contract: walk a document-tree
//! node for a single post or comment and assemble a domain record, or return
//! `None` when the node is noise, contentless, or structurally surprising.
//! The caller picks the family once per scrape based on which layout the
//! document came from.

pub mod basic;
pub mod filter;
pub mod modern;

pub use basic::BasicExtractor;
pub use modern::ModernExtractor;

use dom_query::Selection;

use crate::patterns::{
    AUTHOR_SPLIT_MARKERS, BARE_RELATIVE_TIME, FEED_NOISE_MARKERS, NON_AUTHOR_LABELS,
    SEE_MORE_LEADING, SEE_MORE_TRAILING,
};
use crate::records::{Comment, Post, UNKNOWN_AUTHOR};

/// One extractor family: post and comment extraction for a single layout.
///
/// Implementations are tolerant of missing sub-elements; any record that
/// cannot be assembled comes back as `None`, never as a panic or error.
pub trait RecordExtractor {
    /// Extract one post from its container node.
    fn extract_post(&self, node: &Selection) -> Option<Post>;

    /// Extract one comment from its container node.
    fn extract_comment(&self, node: &Selection) -> Option<Comment>;
}

/// Which document layout a scrape is working against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The www React layout.
    Modern,
    /// The mbasic server-rendered layout.
    Basic,
}

impl Variant {
    /// Build the extractor for this layout with default configuration.
    #[must_use]
    pub fn extractor(self) -> Box<dyn RecordExtractor> {
        match self {
            Self::Modern => Box::new(ModernExtractor::default()),
            Self::Basic => Box::new(BasicExtractor::default()),
        }
    }
}

/// Truncate an author heading at editorial suffixes and reset known
/// non-author labels (and any caller-supplied blacklist entries) to the
/// [`UNKNOWN_AUTHOR`] sentinel.
#[must_use]
pub(crate) fn clean_author_name(name: &str, blacklist: &[String]) -> String {
    let mut name = name.to_string();
    for marker in AUTHOR_SPLIT_MARKERS {
        if let Some(idx) = name.find(marker) {
            name.truncate(idx);
        }
    }

    if NON_AUTHOR_LABELS.contains(&name.as_str()) || blacklist.iter().any(|b| b == &name) {
        return UNKNOWN_AUTHOR.to_string();
    }

    name
}

/// Whether a node is a feed insert rather than member content: the resolved
/// author equals a noise marker, or a marker appears in the first 100
/// characters of the node's text.
#[must_use]
pub(crate) fn is_feed_noise(author_name: &str, node_text: &str) -> bool {
    if FEED_NOISE_MARKERS.contains(&author_name) {
        return true;
    }
    let head: String = node_text.chars().take(100).collect();
    FEED_NOISE_MARKERS.iter().any(|marker| head.contains(marker))
}

/// Strip leading/trailing "See more" expanders and surrounding whitespace.
#[must_use]
pub(crate) fn strip_see_more(text: &str) -> String {
    let cleaned = SEE_MORE_TRAILING.replace(text, "");
    let cleaned = SEE_MORE_LEADING.replace(&cleaned, "");
    cleaned.trim().to_string()
}

/// Whether a text block is a bare relative-timestamp token ("6h", "2w").
#[must_use]
pub(crate) fn is_bare_timestamp(text: &str) -> bool {
    BARE_RELATIVE_TIME.is_match(text)
}

/// Clean each block, drop empties, and deduplicate by exact text, keeping
/// first-seen order.
#[must_use]
pub(crate) fn dedupe_blocks(blocks: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    for block in blocks {
        let cleaned = strip_see_more(block);
        if !cleaned.is_empty() && seen.insert(cleaned.clone()) {
            unique.push(cleaned);
        }
    }
    unique
}

/// The universal acceptance gate: records whose content ends up shorter than
/// five characters are discarded rather than emitted near-empty.
#[must_use]
pub(crate) fn passes_content_gate(content: &str) -> bool {
    content.chars().count() >= 5
}
