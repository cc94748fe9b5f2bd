//! # gleaner
//!
//! Facebook group content extraction.
//!
//! This library turns rendered group pages - from either the modern www
//! layout or the legacy mbasic layout - into typed post and comment records:
//! author, content, timestamp, reaction totals and threaded comments. The
//! documents carry no reliable schema, so every field is inferred from text
//! shape, element roles and positional heuristics, degrading to explicit
//! sentinels ("Unknown" author, missing timestamp, zero reactions) when a
//! signal is absent. A node that yields no usable content produces no
//! record; nothing in the pipeline aborts a batch.
//!
//! Acquiring the pages (navigation, authentication, pagination) and
//! persisting the records are the caller's concerns; the record types are
//! serde-serializable for exactly that purpose.
//!
//! ## Quick Start
//!
//! ```rust
//! use gleaner::{extract_posts, Options, Variant};
//!
//! let html = r#"<html><body>
//! <div data-ft='{"top_level_post_id":"12345"}'>
//!   <h3><a href="/jane.doe">Jane Doe</a></h3>
//!   <div><div><span>Fresh tomatoes at the farmers market today</span></div></div>
//!   <abbr>2h</abbr>
//! </div>
//! </body></html>"#;
//!
//! let posts = extract_posts(html, Variant::Basic, &Options::default())?;
//! assert_eq!(posts.len(), 1);
//! assert_eq!(posts[0].id, "12345");
//! assert_eq!(posts[0].author.as_ref().map(|a| a.name.as_str()), Some("Jane Doe"));
//! # Ok::<(), gleaner::Error>(())
//! ```
//!
//! For finer control, run the per-node extractors directly: parse with
//! [`dom::parse`], select a post container, and hand it to the
//! [`RecordExtractor`] for the layout in use.

mod error;
mod options;
mod records;
mod scrape;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Free-text engagement (reaction count) parsing.
pub mod engagement;

/// Per-node record extractors for the two document layouts.
pub mod extractor;

/// Post/comment/group identifier resolution.
pub mod identity;

/// Compiled regex patterns and chrome vocabularies.
pub mod patterns;

/// Timestamp normalization to absolute instants.
pub mod timestamp;

// Public API - re-exports
pub use engagement::parse_reactions_text;
pub use error::{Error, Result};
pub use extractor::filter::filter_comments;
pub use extractor::{BasicExtractor, ModernExtractor, RecordExtractor, Variant};
pub use identity::{extract_post_id, normalize_group_identifier};
pub use options::Options;
pub use records::{
    Author, Comment, DateRange, GroupInfo, Post, Reactions, ScrapeResult, UNKNOWN_AUTHOR,
};
pub use scrape::{build_result, calculate_date_range};
pub use timestamp::parse_timestamp;

/// Extracts every post (with comments) from a rendered group document.
///
/// # Arguments
///
/// * `html` - The rendered document as a string slice
/// * `variant` - Which layout produced the document
/// * `options` - Walk and filter configuration
///
/// # Returns
///
/// `Ok(posts)` in document order. `Err(Error::EmptyDocument)` for blank
/// input, `Err(Error::NoContent)` when the document has no post containers.
/// A container that fails extraction is skipped, never an error.
#[allow(clippy::missing_errors_doc)]
pub fn extract_posts(html: &str, variant: Variant, options: &Options) -> Result<Vec<records::Post>> {
    scrape::extract_posts(html, variant, options)
}

/// Extracts posts from raw document bytes with charset detection.
///
/// Sniffs the charset declaration (mbasic pages in the wild still ship
/// legacy encodings), transcodes to UTF-8 lossily, then behaves exactly
/// like [`extract_posts`].
#[allow(clippy::missing_errors_doc)]
pub fn extract_posts_bytes(
    bytes: &[u8],
    variant: Variant,
    options: &Options,
) -> Result<Vec<records::Post>> {
    scrape::extract_posts_bytes(bytes, variant, options)
}
