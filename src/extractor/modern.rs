//! Extraction heuristics for the modern www layout.
//!
//! The React feed renders posts as nested `div` soup with almost no stable
//! structure. What survives across revisions: author names sit in `strong`
//! elements or short profile links, member-written text lives in
//! `div[dir="auto"]` blocks, permalinks carry `/posts/` or `story_fbid`
//! hrefs, and engagement is mirrored into accessible labels. Each field is
//! resolved by an ordered cascade of those signals; whatever cannot be
//! resolved degrades to its sentinel rather than failing the record.

use dom_query::Selection;
use tracing::debug;

use crate::dom;
use crate::engagement::parse_reactions_text;
use crate::identity::{extract_post_id, synthetic_comment_id, synthetic_post_id};
use crate::patterns::{
    ALL_REACTIONS_COUNT, COMMENT_CHROME, COMMENT_COUNT, LINE_CHROME, OTHERS_COUNT, POST_CHROME,
    STANDALONE_COUNT, TIME_UNIT_TOKENS,
};
use crate::records::{Author, Comment, Post, Reactions, UNKNOWN_AUTHOR};
use crate::timestamp::parse_timestamp;

use super::{
    clean_author_name, dedupe_blocks, is_bare_timestamp, is_feed_noise, passes_content_gate,
    RecordExtractor,
};

/// Extractor for the modern www layout.
#[derive(Debug, Clone, Default)]
pub struct ModernExtractor {
    /// Extra author names to treat as unresolved, on top of the built-in
    /// non-author labels.
    pub author_blacklist: Vec<String>,
}

impl ModernExtractor {
    /// Extractor honoring a caller-supplied author blacklist.
    #[must_use]
    pub fn with_blacklist(author_blacklist: Vec<String>) -> Self {
        Self { author_blacklist }
    }

    /// Author heuristics, in order: a `strong` element (profile URL from the
    /// nearest enclosing link), then short profile links, then the first
    /// text line when it looks like a name.
    fn resolve_author(&self, node: &Selection, lines: &[String]) -> (String, Option<String>) {
        let mut name = UNKNOWN_AUTHOR.to_string();
        let mut profile_url = None;

        if let Some(strong_node) = node.select("strong").nodes().first() {
            let strong = Selection::from(*strong_node);
            let text = dom::text_content(&strong).trim().to_string();
            if !text.is_empty() {
                name = text;
                profile_url = dom::enclosing_link_href(&strong);
            }
        }

        if name == UNKNOWN_AUTHOR {
            for link_node in node.select(r#"a[role="link"]"#).nodes() {
                let link = Selection::from(*link_node);
                let href = dom::get_attribute(&link, "href").unwrap_or_default();
                let text = dom::text_content(&link).trim().to_string();
                let text_len = text.chars().count();
                if (2..50).contains(&text_len) && looks_like_profile_href(&href) {
                    name = text;
                    profile_url = Some(href);
                    break;
                }
            }
        }

        if name == UNKNOWN_AUTHOR {
            if let Some(first_line) = lines.first() {
                let short = first_line.chars().count() < 50;
                let starts_with_digits = first_line.chars().take(5).any(|c| c.is_ascii_digit());
                if short && !starts_with_digits {
                    name = first_line.clone();
                }
            }
        }

        (clean_author_name(&name, &self.author_blacklist), profile_url)
    }

    /// Content heuristics: auto-direction blocks filtered for chrome, then a
    /// raw-line fallback when the blocks yield nothing.
    fn resolve_content(node: &Selection, author_name: &str, lines: &[String]) -> String {
        let mut parts = Vec::new();
        for div_node in node.select(r#"div[dir="auto"]"#).nodes() {
            let text = dom::visible_text(&Selection::from(*div_node));
            if text.chars().count() < 10 {
                continue;
            }
            if text == author_name || POST_CHROME.contains(&text.as_str()) {
                continue;
            }
            if is_bare_timestamp(&text) {
                continue;
            }
            parts.push(text);
        }

        let unique = dedupe_blocks(&parts);
        let content = unique.iter().take(2).cloned().collect::<Vec<_>>().join("\n");
        if !content.is_empty() {
            return content;
        }

        // Nothing block-shaped; recover from raw lines if there are enough
        if lines.len() > 2 {
            debug!("modern post: falling back to raw-line content recovery");
            let filtered: Vec<String> = lines
                .iter()
                .filter(|line| {
                    line.as_str() != author_name
                        && !is_bare_timestamp(line)
                        && !LINE_CHROME.contains(&line.as_str())
                        && line.chars().count() > 10
                })
                .take(3)
                .cloned()
                .collect();
            return filtered.join("\n");
        }

        String::new()
    }

    fn resolve_timestamp(node: &Selection) -> Option<chrono::DateTime<chrono::Utc>> {
        for link_node in node
            .select(r#"a[href*="/posts/"], a[href*="?story_fbid"]"#)
            .nodes()
        {
            let link = Selection::from(*link_node);
            if let Some(aria) = dom::get_attribute(&link, "aria-label") {
                if let Some(ts) = parse_timestamp(&aria) {
                    return Some(ts);
                }
            }
            let text = dom::text_content(&link).trim().to_string();
            if text.is_empty() {
                continue;
            }
            let lower = text.to_lowercase();
            if TIME_UNIT_TOKENS.iter().any(|token| lower.contains(token)) {
                if let Some(ts) = parse_timestamp(&text) {
                    return Some(ts);
                }
            }
        }
        None
    }

    fn resolve_post_id(node: &Selection, content: &str) -> String {
        for link_node in node.select("a[href]").nodes() {
            let link = Selection::from(*link_node);
            if let Some(href) = dom::get_attribute(&link, "href") {
                if let Some(id) = extract_post_id(&href) {
                    return id;
                }
            }
        }

        if content.is_empty() {
            // No permalink and no content; derive identity from the markup
            let markup = node.html();
            synthetic_post_id(&markup)
        } else {
            synthetic_post_id(content)
        }
    }

    fn resolve_reactions(node: &Selection, all_text: &str) -> Reactions {
        for el in node.select("[aria-label]").nodes() {
            let sel = Selection::from(*el);
            let Some(aria) = dom::get_attribute(&sel, "aria-label") else {
                continue;
            };
            let lower = aria.to_lowercase();
            if lower.contains("reaction") || lower.contains("like") {
                let parsed = parse_reactions_text(&aria);
                if parsed.total > 0 {
                    return parsed;
                }
            }
        }

        if let Some(total) = ALL_REACTIONS_COUNT
            .captures(all_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return Reactions::with_total(total);
        }

        if let Some(total) = OTHERS_COUNT
            .captures(all_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return Reactions::with_total(total);
        }

        Reactions::default()
    }

    fn resolve_comments_count(node: &Selection) -> u32 {
        for el in node.select("[aria-label]").nodes() {
            let sel = Selection::from(*el);
            let Some(aria) = dom::get_attribute(&sel, "aria-label") else {
                continue;
            };
            let lower = aria.to_lowercase();
            if !lower.contains("comment") {
                continue;
            }
            if let Some(count) = COMMENT_COUNT
                .captures(&lower)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
            {
                return count;
            }
        }
        0
    }
}

impl RecordExtractor for ModernExtractor {
    fn extract_post(&self, node: &Selection) -> Option<Post> {
        let all_text = dom::visible_text(node);
        let lines = dom::text_lines(node);

        let (author_name, profile_url) = self.resolve_author(node, &lines);

        if is_feed_noise(&author_name, &all_text) {
            debug!(author = %author_name, "modern post: skipping feed insert");
            return None;
        }

        let content = Self::resolve_content(node, &author_name, &lines);
        let timestamp = Self::resolve_timestamp(node);
        let id = Self::resolve_post_id(node, &content);
        let reactions = Self::resolve_reactions(node, &all_text);
        let comments_count = Self::resolve_comments_count(node);

        if !passes_content_gate(&content) {
            debug!("modern post: discarded, no usable content");
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
        let all_text = dom::visible_text(node);
        let lines = dom::text_lines(node);
        if lines.is_empty() {
            return None;
        }

        let mut author_name = UNKNOWN_AUTHOR.to_string();
        let mut profile_url = None;

        if let Some(strong_node) = node.select("strong").nodes().first() {
            let text = dom::text_content(&Selection::from(*strong_node)).trim().to_string();
            if !text.is_empty() {
                author_name = text;
            }
        }

        for link_node in node.select(r#"a[role="link"]"#).nodes() {
            let link = Selection::from(*link_node);
            let href = dom::get_attribute(&link, "href").unwrap_or_default();
            let text = dom::text_content(&link).trim().to_string();
            if !text.is_empty()
                && text.chars().count() < 50
                && href.contains("facebook.com/")
                && !href.contains("/groups/")
            {
                if author_name == UNKNOWN_AUTHOR {
                    author_name = text;
                }
                profile_url = Some(href);
                break;
            }
        }

        let author_name = clean_author_name(&author_name, &self.author_blacklist);

        // Single content block at comment granularity
        let mut parts = Vec::new();
        for div_node in node.select(r#"div[dir="auto"]"#).nodes() {
            let text = dom::visible_text(&Selection::from(*div_node));
            if text.chars().count() > 5
                && text != author_name
                && !COMMENT_CHROME.contains(&text.as_str())
                && !is_bare_timestamp(&text)
            {
                parts.push(text);
            }
        }

        let mut content = dedupe_blocks(&parts)
            .into_iter()
            .find(|part| part != &author_name)
            .unwrap_or_default();

        if content.is_empty() {
            for line in &lines {
                if line == &author_name
                    || COMMENT_CHROME.contains(&line.as_str())
                    || is_bare_timestamp(line)
                {
                    continue;
                }
                if line.chars().count() > 5 {
                    content = line.clone();
                    break;
                }
            }
        }

        if !passes_content_gate(&content) {
            debug!("modern comment: discarded, no usable content");
            return None;
        }

        let id = synthetic_comment_id(&content);

        let mut reactions = Reactions::default();
        for el in node.select("[aria-label]").nodes() {
            let sel = Selection::from(*el);
            let Some(aria) = dom::get_attribute(&sel, "aria-label") else {
                continue;
            };
            if aria.to_lowercase().contains("reaction") {
                reactions = parse_reactions_text(&aria);
                break;
            }
        }
        if reactions.total == 0 {
            if let Some(total) = STANDALONE_COUNT
                .captures(&all_text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
            {
                reactions = Reactions::with_total(total);
            }
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

fn looks_like_profile_href(href: &str) -> bool {
    href.contains("facebook.com/")
        && !href.contains("/groups/")
        && href.rsplit('/').next().is_some_and(|segment| !segment.contains('?'))
}
