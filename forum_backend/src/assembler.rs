use crate::database::models::{CommentRecord, LikeRecord, ReplyRecord, ThreadRecord};
use crate::error::ForumResult;
use crate::sources::{CommentSource, LikeSource, ReplySource, ThreadSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Shown in place of a soft-deleted comment's content.
pub const DELETED_COMMENT_PLACEHOLDER: &str = "**komentar telah dihapus**";
/// Shown in place of a soft-deleted reply's content.
pub const DELETED_REPLY_PLACEHOLDER: &str = "**balasan telah dihapus**";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    pub username: String,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub like_count: usize,
    pub replies: Vec<ReplyView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyView {
    pub id: String,
    pub content: String,
    pub date: String,
    pub username: String,
}

/// Builds the nested, redacted view of one thread out of the four
/// read-side collections.
#[derive(Clone)]
pub struct ThreadViewAssembler {
    threads: Arc<dyn ThreadSource>,
    comments: Arc<dyn CommentSource>,
    replies: Arc<dyn ReplySource>,
    likes: Arc<dyn LikeSource>,
}

impl ThreadViewAssembler {
    pub fn new(
        threads: Arc<dyn ThreadSource>,
        comments: Arc<dyn CommentSource>,
        replies: Arc<dyn ReplySource>,
        likes: Arc<dyn LikeSource>,
    ) -> Self {
        Self {
            threads,
            comments,
            replies,
            likes,
        }
    }

    /// Uses one value for all four collections.
    pub fn from_source<S>(source: S) -> Self
    where
        S: ThreadSource + CommentSource + ReplySource + LikeSource + 'static,
    {
        let source = Arc::new(source);
        Self {
            threads: source.clone(),
            comments: source.clone(),
            replies: source.clone(),
            likes: source,
        }
    }

    /// Fetches the four collections concurrently and groups them.
    ///
    /// The first failing fetch is returned as-is and the others are dropped,
    /// so a missing thread surfaces as `NotFound` without a partial view.
    pub async fn assemble(&self, thread_id: &str) -> ForumResult<ThreadView> {
        let (thread, comments, replies, likes) = tokio::try_join!(
            self.threads.get_thread_by_id(thread_id),
            self.comments.get_comments_by_thread_id(thread_id),
            self.replies.get_replies_by_thread_id(thread_id),
            self.likes.get_like_count_comment(thread_id),
        )?;
        tracing::debug!(
            thread_id = %thread_id,
            comments = comments.len(),
            replies = replies.len(),
            likes = likes.len(),
            "assembling thread view"
        );
        Ok(build_thread_view(thread, comments, replies, likes))
    }
}

/// Pure grouping step. Comment order follows `comments`, reply order within
/// a comment follows `replies`. Replies without a matching comment are
/// dropped.
pub fn build_thread_view(
    thread: ThreadRecord,
    comments: Vec<CommentRecord>,
    replies: Vec<ReplyRecord>,
    likes: Vec<LikeRecord>,
) -> ThreadView {
    let mut like_counts: HashMap<&str, usize> = HashMap::new();
    for like in &likes {
        *like_counts.entry(like.comment_id.as_str()).or_default() += 1;
    }

    let mut replies_by_comment: HashMap<String, Vec<ReplyView>> = HashMap::new();
    for reply in replies {
        let ReplyRecord {
            id,
            comment_id,
            username,
            date,
            content,
            is_deleted,
        } = reply;
        replies_by_comment
            .entry(comment_id)
            .or_default()
            .push(ReplyView {
                id,
                content: redact(content, is_deleted, DELETED_REPLY_PLACEHOLDER),
                date,
                username,
            });
    }

    let comments = comments
        .into_iter()
        .map(|comment| {
            let like_count = like_counts.get(comment.id.as_str()).copied().unwrap_or(0);
            let replies = replies_by_comment
                .get(&comment.id)
                .cloned()
                .unwrap_or_default();
            CommentView {
                content: redact(
                    comment.content,
                    comment.is_deleted,
                    DELETED_COMMENT_PLACEHOLDER,
                ),
                id: comment.id,
                username: comment.username,
                date: comment.date,
                like_count,
                replies,
            }
        })
        .collect();

    ThreadView {
        id: thread.id,
        title: thread.title,
        body: thread.body,
        date: thread.date,
        username: thread.username,
        comments,
    }
}

fn redact(content: String, is_deleted: bool, placeholder: &str) -> String {
    if is_deleted {
        placeholder.to_owned()
    } else {
        content
    }
}
