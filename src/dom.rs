//! DOM operations adapter.
//!
//! Thin wrappers over `dom_query` naming the handful of operations the
//! extractors need. Everything here is total: a query that finds nothing
//! returns an empty selection or `None`, never panics. That property is what
//! turns "unexpected traversal fault" into "record skipped" at the extractor
//! boundary.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril so callers can hold zero-copy text handles
pub use tendril::StrTendril;

/// Parse an HTML string into a queryable document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get any attribute value from the first node of a selection.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get the tag name (lowercase) of the first node of a selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Raw concatenated text of a selection's subtree, without block separation.
///
/// Fine for inline elements (author links, `<strong>` names, `<abbr>`
/// timestamps). For anything block-structured use [`visible_text`].
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Elements such tags delimit a rendered line; used by [`visible_text`].
fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "div" | "p" | "section" | "article" | "aside" | "header" | "footer" | "li" | "ul"
            | "ol" | "table" | "tr" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote"
    )
}

fn is_skipped_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "noscript")
}

/// Approximate the text a browser would render for this subtree, with
/// newlines at block-element boundaries.
///
/// The heuristics downstream are line-oriented (the layouts separate author,
/// content and chrome into sibling blocks), so plain subtree text
/// concatenation is not enough - "Jane Doe" and "Check this out!" must not
/// fuse into one token.
#[must_use]
pub fn visible_text(sel: &Selection) -> String {
    let mut out = String::new();
    for node in sel.nodes() {
        push_visible_text(*node, &mut out);
    }

    // Collapse runs of blank lines left by nested block boundaries
    let mut lines: Vec<&str> = out.lines().map(str::trim).collect();
    lines.retain(|l| !l.is_empty());
    lines.join("\n")
}

fn push_visible_text(node: dom_query::NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            let text = child.text();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !out.is_empty() && !out.ends_with('\n') && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(trimmed);
            }
        } else if child.is_element() {
            let Some(tag) = child.node_name() else { continue };
            let tag = tag.to_ascii_lowercase();
            if is_skipped_tag(&tag) {
                continue;
            }
            if tag == "br" {
                out.push('\n');
                continue;
            }
            let block = is_block_tag(&tag);
            if block && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            push_visible_text(child, out);
            if block && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

/// Non-empty trimmed lines of a node's rendered text, in document order.
#[must_use]
pub fn text_lines(sel: &Selection) -> Vec<String> {
    visible_text(sel)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Walk up from a node to the nearest enclosing `<a>` and return its href.
#[must_use]
pub fn enclosing_link_href(sel: &Selection) -> Option<String> {
    let node = sel.nodes().first()?;
    for ancestor in node.ancestors(None) {
        if !ancestor.is_element() {
            continue;
        }
        if let Some(tag) = ancestor.node_name() {
            if tag.eq_ignore_ascii_case("a") {
                return get_attribute(&Selection::from(ancestor), "href");
            }
        }
    }
    None
}

/// Whether any ancestor of the selection's first node carries the attribute
/// (with the given value, or any value when `value` is `None`).
#[must_use]
pub fn has_ancestor_with_attr(sel: &Selection, attr: &str, value: Option<&str>) -> bool {
    let Some(node) = sel.nodes().first() else {
        return false;
    };
    for ancestor in node.ancestors(None) {
        if !ancestor.is_element() {
            continue;
        }
        let Some(found) = Selection::from(ancestor).attr(attr) else {
            continue;
        };
        match value {
            Some(expected) if &*found == expected => return true,
            Some(_) => {}
            None => return true,
        }
    }
    false
}
