use chrono::{Duration, Utc};

use gleaner::{dom, ModernExtractor, RecordExtractor};

fn post_node(html: &str) -> dom::Document {
    dom::parse(html)
}

#[test]
fn full_post_with_all_signals() {
    let doc = post_node(
        r#"<html><body>
        <div role="article">
          <div><a role="link" href="https://www.facebook.com/jane.doe"><strong>Jane Doe</strong></a></div>
          <div dir="auto">Check this out!</div>
          <div><a role="link" href="https://www.facebook.com/groups/g/posts/998877" aria-label="6h">6h</a></div>
          <div aria-label="42 reactions">42</div>
          <div aria-label="3 comments">3 comments</div>
          <div dir="auto">Like</div>
          <div dir="auto">Comment</div>
        </div>
        </body></html>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        Some(post) => {
            assert_eq!(post.author.as_ref().map(|a| a.name.as_str()), Some("Jane Doe"));
            assert_eq!(
                post.author.as_ref().and_then(|a| a.profile_url.as_deref()),
                Some("https://www.facebook.com/jane.doe")
            );
            assert_eq!(post.content, "Check this out!");
            assert_eq!(post.id, "998877");
            assert_eq!(post.reactions.total, 42);
            assert_eq!(post.comments_count, 3);

            let expected = Utc::now() - Duration::hours(6);
            match post.timestamp {
                Some(ts) => assert!((ts - expected).num_seconds().abs() < 60),
                None => panic!("expected a timestamp parsed from the permalink label"),
            }
        }
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn feed_noise_nodes_are_skipped() {
    let doc = post_node(
        r#"<div role="article">
          <div dir="auto">People you may know</div>
          <div dir="auto">Suggestions based on mutual friends</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    assert!(ModernExtractor::default().extract_post(&node).is_none());
}

#[test]
fn noise_marker_in_text_head_also_skips() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Suggested for you</strong>
          <div dir="auto">A group advertisement with plenty of text</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    assert!(ModernExtractor::default().extract_post(&node).is_none());
}

#[test]
fn near_empty_content_is_discarded() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Jane Doe</strong>
          <div dir="auto">abc</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    assert!(ModernExtractor::default().extract_post(&node).is_none());
}

#[test]
fn content_blocks_are_deduplicated_and_see_more_stripped() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Jane Doe</strong>
          <div dir="auto">First paragraph of the post… See more</div>
          <div dir="auto">First paragraph of the post</div>
          <div dir="auto">Second paragraph goes here</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        Some(post) => {
            assert_eq!(
                post.content,
                "First paragraph of the post\nSecond paragraph goes here"
            );
            // No permalink anywhere; the id is synthesized from content
            assert!(post.id.starts_with("post_"));
        }
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn author_falls_back_to_profile_link() {
    let doc = post_node(
        r#"<div role="article">
          <div><a role="link" href="https://www.facebook.com/members.john">John Smith</a></div>
          <div dir="auto">Anyone know a good plumber around here?</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        Some(post) => {
            let author = post.author.as_ref();
            assert_eq!(author.map(|a| a.name.as_str()), Some("John Smith"));
            assert_eq!(
                author.and_then(|a| a.profile_url.as_deref()),
                Some("https://www.facebook.com/members.john")
            );
        }
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn group_links_are_not_profile_links() {
    let doc = post_node(
        r#"<div role="article">
          <div><a role="link" href="https://www.facebook.com/groups/plumbers">Plumbers United</a></div>
          <div dir="auto">Welcome to the neighborhood exchange board</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        // First text line becomes the author candidate instead
        Some(post) => {
            assert_eq!(
                post.author.as_ref().map(|a| a.name.as_str()),
                Some("Plumbers United")
            );
            assert_eq!(post.author.as_ref().and_then(|a| a.profile_url.as_deref()), None);
        }
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn editorial_suffix_is_trimmed_from_author() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Jane Doe is with Bob Smith</strong>
          <div dir="auto">Great day at the lake with friends!</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        Some(post) => {
            assert_eq!(post.author.as_ref().map(|a| a.name.as_str()), Some("Jane Doe"));
        }
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn sponsored_author_resets_to_unknown() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Sponsored</strong>
          <div dir="auto">Buy the best lawnmower money can get</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        Some(post) => {
            assert_eq!(post.author.as_ref().map(|a| a.name.as_str()), Some(gleaner::UNKNOWN_AUTHOR));
        }
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn reactions_recovered_from_all_reactions_text() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Jane Doe</strong>
          <div dir="auto">Homemade bread recipe below, enjoy</div>
          <div><div>All reactions:</div><div>44</div></div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let post = ModernExtractor::default().extract_post(&node);
    match post {
        Some(post) => assert_eq!(post.reactions.total, 44),
        None => panic!("expected Some(Post)"),
    }
}

#[test]
fn comment_with_author_content_and_reactions() {
    let doc = post_node(
        r#"<div role="article">
          <a role="link" href="https://www.facebook.com/jane.doe"><strong>Jane Doe</strong></a>
          <div dir="auto">Totally agree with this!</div>
          <div aria-label="5 reactions">5</div>
          <div dir="auto">Reply</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let comment = ModernExtractor::default().extract_comment(&node);
    match comment {
        Some(comment) => {
            assert_eq!(comment.author.as_ref().map(|a| a.name.as_str()), Some("Jane Doe"));
            assert_eq!(comment.content, "Totally agree with this!");
            assert_eq!(comment.reactions.total, 5);
            assert!(comment.id.starts_with("comment_"));
            assert!(comment.replies.is_empty());
        }
        None => panic!("expected Some(Comment)"),
    }
}

#[test]
fn comment_reactions_fall_back_to_standalone_count() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Bob Jones</strong>
          <div dir="auto">Nice catch, congrats!</div>
          <div>7</div>
          <div>Reply</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let comment = ModernExtractor::default().extract_comment(&node);
    match comment {
        Some(comment) => assert_eq!(comment.reactions.total, 7),
        None => panic!("expected Some(Comment)"),
    }
}

#[test]
fn comment_chrome_is_never_content() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Bob Jones</strong>
          <div dir="auto">View replies</div>
          <div dir="auto">See more</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    assert!(ModernExtractor::default().extract_comment(&node).is_none());
}

#[test]
fn blacklisted_author_resets_to_unknown() {
    let doc = post_node(
        r#"<div role="article">
          <strong>Group Bot</strong>
          <div dir="auto">Scheduled digest of this week's activity</div>
        </div>"#,
    );
    let node = doc.select(r#"div[role="article"]"#);

    let extractor = ModernExtractor::with_blacklist(vec!["Group Bot".to_string()]);
    let post = extractor.extract_post(&node);
    match post {
        Some(post) => {
            assert_eq!(post.author.as_ref().map(|a| a.name.as_str()), Some(gleaner::UNKNOWN_AUTHOR));
        }
        None => panic!("expected Some(Post)"),
    }
}
