//! Extraction for the legacy mbasic layout.
//!
//! Server-rendered HTML with real structure: author headings are `h3 > a`
//! pairs, timestamps sit in `abbr` elements, reactions and comment counts are
//! plain anchor links, and the numeric post id is embedded in a `data-ft`
//! JSON attribute. Far fewer heuristics are needed than for the modern
//! layout; the cascades here are short.

use dom_query::Selection;
use tracing::debug;

use crate::dom;
use crate::engagement::{first_integer, parse_reactions_text};
use crate::identity::{extract_post_id, synthetic_comment_id, synthetic_post_id};
use crate::patterns::TOP_LEVEL_POST_ID;
use crate::records::{Author, Comment, Post, Reactions, UNKNOWN_AUTHOR};
use crate::timestamp::parse_timestamp;

use super::{clean_author_name, passes_content_gate, RecordExtractor};

const MBASIC_ORIGIN: &str = "https://mbasic.facebook.com";

/// Extractor for the legacy mbasic layout.
#[derive(Debug, Clone, Default)]
pub struct BasicExtractor {
    /// Extra author names to treat as unresolved, on top of the built-in
    /// non-author labels.
    pub author_blacklist: Vec<String>,
}

impl BasicExtractor {
    /// Extractor honoring a caller-supplied author blacklist.
    #[must_use]
    pub fn with_blacklist(author_blacklist: Vec<String>) -> Self {
        Self { author_blacklist }
    }

    /// Author from the `h3 a` heading link, with relative profile hrefs
    /// absolutized against the mbasic origin.
    fn resolve_author(&self, node: &Selection, selector: &str) -> (String, Option<String>) {
        let mut name = UNKNOWN_AUTHOR.to_string();
        let mut profile_url = None;

        if let Some(link_node) = node.select(selector).nodes().first() {
            let link = Selection::from(*link_node);
            let text = dom::text_content(&link).trim().to_string();
            if !text.is_empty() {
                name = text;
            }
            profile_url = dom::get_attribute(&link, "href").map(absolutize_profile_url);
        }

        (clean_author_name(&name, &self.author_blacklist), profile_url)
    }
}

impl RecordExtractor for BasicExtractor {
    fn extract_post(&self, node: &Selection) -> Option<Post> {
        let (author_name, profile_url) = self.resolve_author(node, "h3 a");

        // The post body is a specific nested span; paragraphs are the fallback
        let mut content = String::new();
        if let Some(span_node) = node.select("div > div > span").nodes().first() {
            content = dom::visible_text(&Selection::from(*span_node));
        }
        if content.is_empty() {
            let paragraphs: Vec<String> = node
                .select("p")
                .nodes()
                .iter()
                .map(|p| dom::visible_text(&Selection::from(*p)))
                .filter(|text| !text.is_empty())
                .collect();
            content = paragraphs.join("\n");
        }

        let timestamp = node
            .select("abbr")
            .nodes()
            .first()
            .map(|abbr| dom::text_content(&Selection::from(*abbr)).trim().to_string())
            .and_then(|text| parse_timestamp(&text));

        let mut post_id = node
            .select(r#"a[href*="/story.php"], a[href*="/posts/"]"#)
            .nodes()
            .first()
            .and_then(|link| dom::get_attribute(&Selection::from(*link), "href"))
            .and_then(|href| extract_post_id(&href));

        if post_id.is_none() {
            // mbasic embeds the numeric id in the data-ft JSON blob
            post_id = dom::get_attribute(node, "data-ft")
                .and_then(|data_ft| data_ft_post_id(&data_ft));
        }

        let id = post_id.unwrap_or_else(|| {
            if content.is_empty() {
                let markup = node.html();
                synthetic_post_id(&markup)
            } else {
                synthetic_post_id(&content)
            }
        });

        let reactions = node
            .select(r#"a[href*="/ufi/reaction/"]"#)
            .nodes()
            .first()
            .map(|link| dom::text_content(&Selection::from(*link)).trim().to_string())
            .map_or_else(Reactions::default, |text| parse_reactions_text(&text));

        let comments_count = node
            .select(r#"a[href*="comment"]"#)
            .nodes()
            .first()
            .and_then(|link| first_integer(&dom::text_content(&Selection::from(*link))))
            .unwrap_or(0);

        if !passes_content_gate(&content) {
            debug!("basic post: discarded, no usable content");
            return None;
        }

        Some(Post {
            id,
            author: Some(Author::new(author_name, profile_url)),
            content,
            timestamp,
            reactions,
            comments_count,
            comments: Vec::new(),
        })
    }

    fn extract_comment(&self, node: &Selection) -> Option<Comment> {
        let (author_name, profile_url) = self.resolve_author(node, "h3 a");

        let mut content = String::new();
        if let Some(content_node) = node
            .select("div[data-commentid] > div, h3 + div")
            .nodes()
            .first()
        {
            content = dom::visible_text(&Selection::from(*content_node));
        }
        if content.is_empty() {
            // Everything after the author heading line
            let lines = dom::text_lines(node);
            if lines.len() > 1 {
                content = lines[1..].join("\n");
            }
        }

        let id = dom::get_attribute(node, "data-commentid").unwrap_or_else(|| {
            if content.is_empty() {
                let markup = node.html();
                synthetic_comment_id(&markup)
            } else {
                synthetic_comment_id(&content)
            }
        });

        let reactions = node
            .select(r#"a[href*="reaction"]"#)
            .nodes()
            .first()
            .map(|link| dom::text_content(&Selection::from(*link)).trim().to_string())
            .map_or_else(Reactions::default, |text| parse_reactions_text(&text));

        if !passes_content_gate(&content) {
            debug!("basic comment: discarded, no usable content");
            return None;
        }

        Some(Comment {
            id,
            author: Some(Author::new(author_name, profile_url)),
            content,
            timestamp: None,
            reactions,
            replies: Vec::new(),
        })
    }
}

/// Numeric post id from an mbasic `data-ft` attribute: proper JSON when the
/// blob parses, a regex scan when it does not.
fn data_ft_post_id(data_ft: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(data_ft) {
        if let Some(id) = value.get("top_level_post_id").and_then(serde_json::Value::as_str) {
            return Some(id.to_string());
        }
    }
    TOP_LEVEL_POST_ID
        .captures(data_ft)
        .map(|caps| caps[1].to_string())
}

fn absolutize_profile_url(href: String) -> String {
    if href.starts_with("http") {
        href
    } else {
        format!("{MBASIC_ORIGIN}{href}")
    }
}
