//! Display ordering, per-role numbering, and reply grouping for a
//! project's comment collection.
//!
//! The render sequence is recomputed in full from scratch on every
//! change to the underlying collection. Nothing here keeps incremental
//! state between calls, so the output is idempotent and order-stable no
//! matter how the collection mutated.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::comment::Comment;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// DisplayComment
// ---------------------------------------------------------------------------

/// One entry in the render-ready comment sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayComment<'a> {
    pub comment: &'a Comment,
    /// 1-based rank within the comment's authorship class (editor vs
    /// client), ordered by ascending timestamp. Replies carry no number.
    pub number: Option<usize>,
    /// Resolved parent for a reply; `None` for top-level comments and
    /// for orphaned replies.
    pub parent: Option<RecordId>,
    /// A reply whose parent could not be resolved. Rendered without
    /// parent context rather than dropped.
    pub orphan: bool,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Display sort: ascending timestamp, non-replies before replies at the
/// same timestamp, then ascending creation time. The sort is stable, so
/// full ties keep their original relative order.
fn display_cmp(a: &Comment, b: &Comment) -> Ordering {
    a.timestamp
        .partial_cmp(&b.timestamp)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.is_reply().cmp(&b.is_reply()))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Assign 1-based ranks to the non-reply comments of one authorship
/// class, ordered by ascending timestamp.
fn class_ranks<'a>(
    comments: impl Iterator<Item = &'a Comment>,
) -> HashMap<RecordId, usize> {
    let mut class: Vec<&Comment> = comments.collect();
    class.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(Ordering::Equal)
    });
    class
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i + 1))
        .collect()
}

/// Produce the render-ready ordered sequence for a comment collection.
///
/// Replies are attached to their explicit `parent_id` when that comment
/// is present in the collection. Legacy replies without one fall back to
/// the nearest preceding non-reply sharing their timestamp; when neither
/// resolves, the reply is kept as an orphan.
pub fn render_order(comments: &[Comment]) -> Vec<DisplayComment<'_>> {
    let mut sorted: Vec<&Comment> = comments.iter().collect();
    sorted.sort_by(|a, b| display_cmp(a, b));

    let editor_ranks = class_ranks(
        comments
            .iter()
            .filter(|c| !c.is_reply() && c.author.is_editor()),
    );
    let client_ranks = class_ranks(
        comments
            .iter()
            .filter(|c| !c.is_reply() && !c.author.is_editor()),
    );

    let known_ids: HashSet<RecordId> = comments.iter().map(|c| c.id).collect();

    let mut out = Vec::with_capacity(sorted.len());
    let mut last_top_level: Option<&Comment> = None;

    for comment in sorted {
        if !comment.is_reply() {
            last_top_level = Some(comment);
            let number = if comment.author.is_editor() {
                editor_ranks.get(&comment.id).copied()
            } else {
                client_ranks.get(&comment.id).copied()
            };
            out.push(DisplayComment {
                comment,
                number,
                parent: None,
                orphan: false,
            });
            continue;
        }

        let parent = match comment.parent_id {
            Some(pid) if known_ids.contains(&pid) => Some(pid),
            _ => last_top_level
                .filter(|p| p.timestamp == comment.timestamp)
                .map(|p| p.id),
        };
        out.push(DisplayComment {
            comment,
            orphan: parent.is_none(),
            parent,
            number: None,
        });
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Author;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn comment(timestamp: f64, author: Author, content: &str, seq: i64) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            content: content.to_string(),
            timestamp,
            author,
            parent_id: None,
            created_at: Utc::now() + Duration::seconds(seq),
            is_completed: false,
            deleted_at: None,
        }
    }

    fn editor() -> Author {
        Author::Editor(Uuid::from_u128(1))
    }

    // -- Sort order ----------------------------------------------------------

    #[test]
    fn sorts_by_timestamp_then_preserves_tie_order() {
        let comments = vec![
            comment(5.0, editor(), "a", 0),
            comment(5.0, Author::Client, "b", 0),
            comment(3.0, editor(), "c", 0),
        ];
        let order = render_order(&comments);
        let contents: Vec<&str> = order.iter().map(|d| d.comment.content.as_str()).collect();
        assert_eq!(contents, vec!["c", "a", "b"]);
    }

    #[test]
    fn replies_sort_after_top_level_at_same_timestamp() {
        let reply = comment(5.0, Author::Client, "Reply: sure", 0);
        let comments = vec![reply, comment(5.0, editor(), "top", 1)];
        let order = render_order(&comments);
        assert_eq!(order[0].comment.content, "top");
        assert_eq!(order[1].comment.content, "Reply: sure");
    }

    #[test]
    fn equal_timestamp_replies_sort_by_created_at() {
        let mut r1 = comment(5.0, editor(), "Reply: later", 10);
        let mut r2 = comment(5.0, editor(), "Reply: earlier", 5);
        r1.parent_id = Some(Uuid::from_u128(9));
        r2.parent_id = Some(Uuid::from_u128(9));
        let comments = vec![r1, r2, comment(5.0, editor(), "top", 0)];
        let order = render_order(&comments);
        assert_eq!(order[1].comment.content, "Reply: earlier");
        assert_eq!(order[2].comment.content, "Reply: later");
    }

    // -- Numbering -----------------------------------------------------------

    #[test]
    fn numbering_is_per_authorship_class() {
        let comments = vec![
            comment(5.0, editor(), "e2", 0),
            comment(5.0, Author::Client, "c1", 1),
            comment(3.0, editor(), "e1", 2),
        ];
        let order = render_order(&comments);
        let find = |content: &str| order.iter().find(|d| d.comment.content == content).unwrap();
        assert_eq!(find("e1").number, Some(1));
        assert_eq!(find("e2").number, Some(2));
        assert_eq!(find("c1").number, Some(1));
    }

    #[test]
    fn replies_are_never_numbered() {
        let top = comment(5.0, editor(), "top", 0);
        let mut reply = comment(5.0, Author::Client, "Reply: ok", 1);
        reply.parent_id = Some(top.id);
        let comments = [top, reply];
        let order = render_order(&comments);
        assert_eq!(order[1].number, None);
    }

    #[test]
    fn numbering_survives_reordering_of_input() {
        let a = comment(3.0, editor(), "first", 0);
        let b = comment(7.0, editor(), "second", 1);
        let fwd = [a.clone(), b.clone()];
        let forward = render_order(&fwd);
        let bwd = [b, a];
        let backward = render_order(&bwd);
        assert_eq!(forward[0].number, backward[0].number);
        assert_eq!(forward[1].number, backward[1].number);
    }

    // -- Reply grouping ------------------------------------------------------

    #[test]
    fn explicit_parent_id_wins() {
        let t1 = comment(5.0, editor(), "one", 0);
        let t2 = comment(5.0, editor(), "two", 1);
        let mut reply = comment(5.0, Author::Client, "Reply: for one", 2);
        reply.parent_id = Some(t1.id);
        let t1_id = t1.id;
        let comments = [t1, t2, reply];
        let order = render_order(&comments);
        let r = order.iter().find(|d| d.comment.is_reply()).unwrap();
        assert_eq!(r.parent, Some(t1_id));
        assert!(!r.orphan);
    }

    #[test]
    fn legacy_reply_groups_by_shared_timestamp() {
        let top = comment(5.0, editor(), "top", 0);
        let reply = comment(5.0, Author::Client, "Reply: legacy", 1);
        let top_id = top.id;
        let comments = [top, reply];
        let order = render_order(&comments);
        let r = order.iter().find(|d| d.comment.is_reply()).unwrap();
        assert_eq!(r.parent, Some(top_id));
    }

    #[test]
    fn reply_without_matching_timestamp_is_orphan() {
        let top = comment(3.0, editor(), "top", 0);
        let reply = comment(5.0, Author::Client, "Reply: lost", 1);
        let comments = [top, reply];
        let order = render_order(&comments);
        let r = order.iter().find(|d| d.comment.is_reply()).unwrap();
        assert!(r.orphan);
        assert_eq!(r.parent, None);
    }

    #[test]
    fn dangling_parent_id_falls_back_to_timestamp() {
        let top = comment(5.0, editor(), "top", 0);
        let mut reply = comment(5.0, Author::Client, "Reply: dangling", 1);
        reply.parent_id = Some(Uuid::from_u128(99));
        let top_id = top.id;
        let comments = [top, reply];
        let order = render_order(&comments);
        let r = order.iter().find(|d| d.comment.is_reply()).unwrap();
        assert_eq!(r.parent, Some(top_id));
        assert!(!r.orphan);
    }

    #[test]
    fn empty_collection_renders_empty() {
        assert!(render_order(&[]).is_empty());
    }
}
