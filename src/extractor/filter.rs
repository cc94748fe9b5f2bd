//! Popularity filtering for extracted comment trees.
//!
//! Filtering rebuilds the tree instead of editing it: the same `Comment`
//! value can appear under several filter calls without one call observing
//! another's work.

use crate::records::Comment;

/// Filter a comment list by popularity, recursively over replies.
///
/// Two steps at each level, in order: drop comments with fewer than
/// `min_reactions` total reactions (when `min_reactions > 0`), then keep the
/// `top_n` most-reacted of the survivors (when `top_n > 0`; the sort is
/// stable, so equal totals keep their document order). Replies are then
/// filtered with the same thresholds, independently of how their parent
/// fared at this level.
///
/// Zero thresholds make the function the identity, and it is idempotent for
/// any thresholds.
#[must_use]
pub fn filter_comments(comments: &[Comment], min_reactions: u32, top_n: usize) -> Vec<Comment> {
    let mut kept: Vec<Comment> = comments
        .iter()
        .filter(|comment| min_reactions == 0 || comment.reactions.total >= min_reactions)
        .cloned()
        .collect();

    if top_n > 0 {
        kept.sort_by(|a, b| b.reactions.total.cmp(&a.reactions.total));
        kept.truncate(top_n);
    }

    kept.into_iter()
        .map(|mut comment| {
            if !comment.replies.is_empty() {
                comment.replies = filter_comments(&comment.replies, min_reactions, top_n);
            }
            comment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Reactions;

    fn comment(id: &str, total: u32, replies: Vec<Comment>) -> Comment {
        Comment {
            id: id.to_string(),
            author: None,
            content: format!("comment {id}"),
            timestamp: None,
            reactions: Reactions::with_total(total),
            replies,
        }
    }

    #[test]
    fn zero_thresholds_are_identity() {
        let comments = vec![comment("a", 0, vec![]), comment("b", 5, vec![])];
        let filtered = filter_comments(&comments, 0, 0);
        assert_eq!(filtered, comments);
    }

    #[test]
    fn min_reactions_drops_below_threshold() {
        let comments = vec![
            comment("a", 1, vec![]),
            comment("b", 5, vec![]),
            comment("c", 3, vec![]),
        ];
        let filtered = filter_comments(&comments, 3, 0);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let comments = vec![
            comment("a", 1, vec![]),
            comment("b", 9, vec![]),
            comment("c", 4, vec![]),
        ];
        let filtered = filter_comments(&comments, 0, 2);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn ties_keep_document_order() {
        let comments = vec![
            comment("a", 2, vec![]),
            comment("b", 2, vec![]),
            comment("c", 2, vec![]),
        ];
        let filtered = filter_comments(&comments, 0, 2);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn replies_filtered_independently_of_parent() {
        // The reply with 10 reactions survives even though its parent only
        // squeaks by; a sibling reply below threshold is dropped.
        let comments = vec![comment(
            "parent",
            3,
            vec![comment("strong-reply", 10, vec![]), comment("weak-reply", 1, vec![])],
        )];
        let filtered = filter_comments(&comments, 3, 0);
        assert_eq!(filtered.len(), 1);
        let replies: Vec<&str> = filtered[0].replies.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(replies, vec!["strong-reply"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let comments = vec![
            comment("a", 7, vec![comment("r1", 2, vec![]), comment("r2", 8, vec![])]),
            comment("b", 4, vec![]),
            comment("c", 9, vec![]),
        ];
        let once = filter_comments(&comments, 3, 2);
        let twice = filter_comments(&once, 3, 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_not_mutated() {
        let comments = vec![comment("a", 1, vec![comment("r", 9, vec![])])];
        let _ = filter_comments(&comments, 5, 0);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].replies.len(), 1);
    }
}
