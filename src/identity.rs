//! Identifier resolution for posts, comments and groups.
//!
//! Permalinks are the authoritative id source; when no link yields one, a
//! deterministic content-hash id is synthesized so that re-running a scrape
//! over unchanged content produces the same ids. The hash is plain FNV-1a 64
//! reduced mod 10^9 - explicit and platform-independent on purpose, so ids
//! reproduce across runs and across implementations.

use url::Url;

use crate::patterns::{PFBID_TOKEN, POSTS_PATH_ID, STORY_FBID_PARAM};

/// Extract a post id from a permalink-shaped URL.
///
/// Resolution order: the `story_fbid` query parameter, a `/posts/<digits>`
/// path segment, then a `pfbid` token anywhere in the URL. Malformed input
/// never fails; resolution simply returns `None`.
#[must_use]
pub fn extract_post_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    if url.contains("story_fbid") {
        if let Ok(parsed) = Url::parse(url) {
            if let Some((_, value)) = parsed.query_pairs().find(|(key, _)| key == "story_fbid") {
                if !value.is_empty() {
                    return Some(value.into_owned());
                }
            }
        } else if let Some(caps) = STORY_FBID_PARAM.captures(url) {
            // mbasic hrefs are usually relative and won't parse as absolute
            return Some(caps[1].to_string());
        }
    }

    if let Some(caps) = POSTS_PATH_ID.captures(url) {
        return Some(caps[1].to_string());
    }

    if let Some(token) = PFBID_TOKEN.find(url) {
        return Some(token.as_str().to_string());
    }

    None
}

/// Reduce a group URL, numeric id or slug to the bare group identifier.
///
/// `https://www.facebook.com/groups/mycityfoodies?ref=share` and
/// `mycityfoodies` both yield `mycityfoodies`.
#[must_use]
pub fn normalize_group_identifier(input: &str) -> String {
    let input = input.trim();

    if let Some(idx) = input.find("/groups/") {
        let rest = &input[idx + "/groups/".len()..];
        return rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string();
    }

    input.to_string()
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit over the first `take` characters, reduced mod 10^9.
fn content_fingerprint(content: &str, take: usize) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for ch in content.chars().take(take) {
        let mut buf = [0u8; 4];
        for byte in ch.encode_utf8(&mut buf).as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash % 1_000_000_000
}

/// Synthetic post id from a content hash.
///
/// Stable across runs for identical content; a one-character content change
/// produces a different id, which is an accepted limitation.
#[must_use]
pub fn synthetic_post_id(content: &str) -> String {
    format!("post_{}", content_fingerprint(content, 50))
}

/// Synthetic comment id from a content hash.
#[must_use]
pub fn synthetic_comment_id(content: &str) -> String {
    format!("comment_{}", content_fingerprint(content, 30))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_posts_path() {
        assert_eq!(
            extract_post_id("https://www.facebook.com/groups/g/posts/998877"),
            Some("998877".to_string())
        );
    }

    #[test]
    fn id_from_story_fbid_param() {
        assert_eq!(
            extract_post_id("https://www.facebook.com/permalink.php?story_fbid=555&id=1"),
            Some("555".to_string())
        );
    }

    #[test]
    fn id_from_relative_story_href() {
        assert_eq!(
            extract_post_id("/story.php?story_fbid=987&id=4"),
            Some("987".to_string())
        );
    }

    #[test]
    fn id_from_pfbid_token() {
        assert_eq!(
            extract_post_id("https://www.facebook.com/x/pfbidAbC123"),
            Some("pfbidAbC123".to_string())
        );
    }

    #[test]
    fn no_id_in_unrelated_urls() {
        assert_eq!(extract_post_id(""), None);
        assert_eq!(extract_post_id("https://www.facebook.com/groups/feed"), None);
        assert_eq!(extract_post_id("not a url at all"), None);
    }

    #[test]
    fn group_identifier_from_url() {
        assert_eq!(
            normalize_group_identifier("https://www.facebook.com/groups/mycityfoodies"),
            "mycityfoodies"
        );
        assert_eq!(
            normalize_group_identifier("https://www.facebook.com/groups/mycityfoodies?ref=share"),
            "mycityfoodies"
        );
        assert_eq!(
            normalize_group_identifier("https://www.facebook.com/groups/123/permalink/456"),
            "123"
        );
    }

    #[test]
    fn group_identifier_passthrough() {
        assert_eq!(normalize_group_identifier("123456789"), "123456789");
        assert_eq!(normalize_group_identifier("my.city.foodies"), "my.city.foodies");
        assert_eq!(normalize_group_identifier("  mycityfoodies  "), "mycityfoodies");
    }

    #[test]
    fn synthetic_ids_are_deterministic() {
        let a = synthetic_post_id("Check this out!");
        let b = synthetic_post_id("Check this out!");
        assert_eq!(a, b);
        assert!(a.starts_with("post_"));

        let c = synthetic_post_id("Check this out?");
        assert_ne!(a, c);
    }

    #[test]
    fn synthetic_ids_only_read_the_prefix() {
        let long_a = format!("{}{}", "x".repeat(50), "tail one");
        let long_b = format!("{}{}", "x".repeat(50), "tail two");
        assert_eq!(synthetic_post_id(&long_a), synthetic_post_id(&long_b));
    }

    #[test]
    fn comment_ids_use_their_own_prefix() {
        let id = synthetic_comment_id("Nice post!");
        assert!(id.starts_with("comment_"));
    }
}
