//! Document-level extraction walk.
//!
//! The acquisition layer hands over a fully rendered document; this module
//! locates the post containers for the layout in use, runs the per-node
//! extractors (skipping any node that fails), attaches comments in document
//! order, and applies the popularity filter. A document with zero
//! recognizable containers is an error; a container that fails extraction is
//! not.

use chrono::{DateTime, Duration, Utc};
use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom;
use crate::error::{Error, Result};
use crate::extractor::filter::filter_comments;
use crate::extractor::{BasicExtractor, ModernExtractor, RecordExtractor, Variant};
use crate::options::Options;
use crate::records::{DateRange, GroupInfo, Post, ScrapeResult};

/// Extract every post (with comments) from a rendered document.
///
/// Returns `Err(EmptyDocument)` for blank input and `Err(NoContent)` when no
/// post container exists in the tree. Individual records that cannot be
/// extracted are skipped, never an error.
pub fn extract_posts(html: &str, variant: Variant, options: &Options) -> Result<Vec<Post>> {
    if html.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    let doc = dom::parse(html);
    let extractor = build_extractor(variant, options);
    let containers = post_nodes(&doc, variant);
    if containers.is_empty() {
        return Err(Error::NoContent);
    }

    let mut posts = Vec::new();
    for container in &containers {
        if options.max_posts > 0 && posts.len() >= options.max_posts {
            break;
        }

        let Some(mut post) = extractor.extract_post(container) else {
            continue;
        };

        if !options.skip_comments {
            let mut comments = Vec::new();
            for comment_node in comment_nodes(container, variant) {
                if let Some(comment) = extractor.extract_comment(&comment_node) {
                    comments.push(comment);
                }
            }
            if options.min_comment_reactions > 0 || options.top_comments > 0 {
                comments =
                    filter_comments(&comments, options.min_comment_reactions, options.top_comments);
            }
            post.comments = comments;
        }

        posts.push(post);
    }

    debug!(
        containers = containers.len(),
        posts = posts.len(),
        "document walk finished"
    );
    Ok(posts)
}

/// [`extract_posts`] over raw bytes, with charset sniffing.
pub fn extract_posts_bytes(bytes: &[u8], variant: Variant, options: &Options) -> Result<Vec<Post>> {
    let html = crate::encoding::transcode_to_utf8(bytes);
    extract_posts(&html, variant, options)
}

/// The date window a scrape covers: explicit bounds win, otherwise `days`
/// counted back from `now`.
#[must_use]
pub fn calculate_date_range(options: &Options, now: DateTime<Utc>) -> DateRange {
    let until = options.until.unwrap_or_else(|| now.date_naive());
    let since = options
        .since
        .unwrap_or_else(|| until - Duration::days(options.days));
    DateRange { since, until }
}

/// Assemble the final scrape result, stamping the scrape time.
#[must_use]
pub fn build_result(group: GroupInfo, posts: Vec<Post>, date_range: DateRange) -> ScrapeResult {
    ScrapeResult {
        group,
        scraped_at: Utc::now(),
        date_range,
        posts,
    }
}

fn build_extractor(variant: Variant, options: &Options) -> Box<dyn RecordExtractor> {
    let blacklist = options.author_blacklist.clone().unwrap_or_default();
    match variant {
        Variant::Modern => Box::new(ModernExtractor::with_blacklist(blacklist)),
        Variant::Basic => Box::new(BasicExtractor::with_blacklist(blacklist)),
    }
}

/// Outermost post containers for the layout, in document order. Nested
/// occurrences of the container shape are comments, not posts.
fn post_nodes<'a>(doc: &'a Document, variant: Variant) -> Vec<Selection<'a>> {
    let (selector, attr, value) = match variant {
        Variant::Modern => (r#"div[role="article"]"#, "role", Some("article")),
        Variant::Basic => ("div[data-ft]", "data-ft", None),
    };

    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| !dom::has_ancestor_with_attr(sel, attr, value))
        .collect()
}

/// Comment nodes under one post container, in document order.
fn comment_nodes<'a>(container: &Selection<'a>, variant: Variant) -> Vec<Selection<'a>> {
    let selector = match variant {
        Variant::Modern => r#"div[role="article"]"#,
        Variant::Basic => "div[data-commentid]",
    };

    container
        .select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}
