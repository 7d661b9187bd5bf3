//! SRT and CSV serialization of a project's comment collection.
//!
//! Both generators take a snapshot of the current collection and return
//! text; triggering the actual file download is the embedding
//! application's job. Replies and soft-deleted comments are excluded
//! from both formats.

use crate::comment::Comment;
use crate::timecode::{format_display, format_srt};

/// Fixed display duration of one SRT cue, in seconds.
pub const SRT_CUE_SECONDS: f64 = 2.0;

/// Suggested filename for the SRT export.
pub const SRT_FILENAME: &str = "comments.srt";

/// Suggested filename for the CSV export.
pub const CSV_FILENAME: &str = "comments.csv";

/// Comments that appear in exports: top-level and not soft-deleted.
fn exportable(comments: &[Comment]) -> impl Iterator<Item = &Comment> {
    comments.iter().filter(|c| c.is_exportable())
}

/// Serialize the exportable comments as SubRip subtitles.
///
/// Cues are numbered sequentially from 1 in list order; each cue runs
/// for [`SRT_CUE_SECONDS`] from the comment's timestamp. An all-excluded
/// collection yields an empty string.
pub fn to_srt(comments: &[Comment]) -> String {
    let blocks: Vec<String> = exportable(comments)
        .enumerate()
        .map(|(i, c)| {
            let start = format_srt(c.timestamp);
            let end = format_srt(c.timestamp + SRT_CUE_SECONDS);
            format!("{}\n{start} --> {end}\n{}\n", i + 1, c.content)
        })
        .collect();
    blocks.join("\n")
}

/// Serialize the exportable comments as CSV.
///
/// Header row is `author,timestamp,text`; the text field is
/// double-quoted with internal quotes doubled. The author column is the
/// role label (`Editor`/`Client`), the timestamp the `M:SS` display
/// form. An all-excluded collection yields the header only.
pub fn to_csv(comments: &[Comment]) -> String {
    let mut lines = vec!["author,timestamp,text".to_string()];
    lines.extend(exportable(comments).map(|c| {
        let text = c.content.replace('"', "\"\"");
        format!(
            "{},{},\"{text}\"",
            c.author.label(),
            format_display(c.timestamp)
        )
    }));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::Author;
    use crate::types::RecordId;
    use chrono::Utc;
    use uuid::Uuid;

    fn comment(content: &str, timestamp: f64, author: Author) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            content: content.to_string(),
            timestamp,
            author,
            parent_id: None,
            created_at: Utc::now(),
            is_completed: false,
            deleted_at: None,
        }
    }

    fn reply_to(parent: RecordId, content: &str, timestamp: f64) -> Comment {
        let mut c = comment(content, timestamp, Author::Client);
        c.parent_id = Some(parent);
        c
    }

    // -- SRT -----------------------------------------------------------------

    #[test]
    fn srt_emits_numbered_two_second_cues() {
        let comments = vec![
            comment("first note", 5.0, Author::Client),
            comment("second note", 65.25, Author::Editor(Uuid::new_v4())),
        ];
        let srt = to_srt(&comments);
        assert_eq!(
            srt,
            "1\n00:00:05,000 --> 00:00:07,000\nfirst note\n\n\
             2\n00:01:05,250 --> 00:01:07,250\nsecond note\n"
        );
    }

    #[test]
    fn srt_excludes_replies_and_deleted() {
        let top = comment("keep", 1.0, Author::Client);
        let legacy_reply = comment("Reply: skip", 1.0, Author::Client);
        let linked_reply = reply_to(top.id, "also skip", 1.0);
        let mut deleted = comment("gone", 2.0, Author::Client);
        deleted.deleted_at = Some(Utc::now());

        let srt = to_srt(&[top, legacy_reply, linked_reply, deleted]);
        assert!(srt.contains("keep"));
        assert!(!srt.contains("skip"));
        assert!(!srt.contains("gone"));
    }

    #[test]
    fn srt_of_all_excluded_is_empty() {
        let mut deleted = comment("gone", 2.0, Author::Client);
        deleted.deleted_at = Some(Utc::now());
        let reply = comment("Reply: hi", 1.0, Author::Client);
        assert_eq!(to_srt(&[deleted, reply]), "");
        assert_eq!(to_srt(&[]), "");
    }

    // -- CSV -----------------------------------------------------------------

    #[test]
    fn csv_quotes_text_and_doubles_inner_quotes() {
        let comments = vec![comment("Say \"hi\"", 5.0, Author::Client)];
        let csv = to_csv(&comments);
        assert_eq!(csv, "author,timestamp,text\nClient,0:05,\"Say \"\"hi\"\"\"");
    }

    #[test]
    fn csv_labels_authors_by_role() {
        let comments = vec![
            comment("from editor", 10.0, Author::Editor(Uuid::new_v4())),
            comment("from client", 20.0, Author::Client),
        ];
        let csv = to_csv(&comments);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "Editor,0:10,\"from editor\"");
        assert_eq!(lines[2], "Client,0:20,\"from client\"");
    }

    #[test]
    fn csv_of_all_excluded_is_header_only() {
        let reply = comment("Reply: hi", 1.0, Author::Client);
        assert_eq!(to_csv(&[reply]), "author,timestamp,text");
        assert_eq!(to_csv(&[]), "author,timestamp,text");
    }

    #[test]
    fn csv_excludes_deleted_rows() {
        let mut deleted = comment("gone", 2.0, Author::Client);
        deleted.deleted_at = Some(Utc::now());
        let csv = to_csv(&[deleted, comment("kept", 3.0, Author::Client)]);
        assert!(!csv.contains("gone"));
        assert!(csv.contains("kept"));
    }
}
