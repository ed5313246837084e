use crate::database::models::{NewCommentRecord, NewReplyRecord};
use crate::database::repositories::{CommentRepository, ReplyRepository, ThreadRepository};
use crate::database::Database;
use crate::error::{ForumError, ForumResult};
use crate::threading::require_text;
use crate::utils::{new_id, now_utc_iso};
use serde::{Deserialize, Serialize};

/// Write side for comments and their replies. Deletion is always soft: the
/// row stays and the thread view shows a placeholder instead.
#[derive(Clone)]
pub struct CommentService {
    database: Database,
}

impl CommentService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn add_comment(&self, input: NewComment) -> ForumResult<AddedComment> {
        require_text("content", &input.content)?;

        let record = NewCommentRecord {
            id: new_id("comment"),
            thread_id: input.thread_id,
            owner: input.owner,
            content: input.content,
            date: now_utc_iso(),
        };
        let stored = self.database.with_repositories(|repos| {
            if !repos.threads().exists(&record.thread_id)? {
                return Ok(false);
            }
            repos.comments().create(&record)?;
            Ok(true)
        })?;
        if !stored {
            return Err(thread_not_found(&record.thread_id));
        }
        tracing::info!(thread_id = %record.thread_id, comment_id = %record.id, "comment added");

        Ok(AddedComment {
            id: record.id,
            content: record.content,
            owner: record.owner,
        })
    }

    pub fn delete_comment(&self, thread_id: &str, comment_id: &str) -> ForumResult<()> {
        let deleted = self.database.with_repositories(|repos| {
            let comments = repos.comments();
            if !comments.exists_in_thread(thread_id, comment_id)? {
                return Ok(false);
            }
            comments.soft_delete(comment_id)?;
            Ok(true)
        })?;
        if !deleted {
            return Err(comment_not_found(thread_id, comment_id));
        }
        tracing::info!(thread_id = %thread_id, comment_id = %comment_id, "comment deleted");
        Ok(())
    }

    pub fn add_reply(&self, input: NewReply) -> ForumResult<AddedReply> {
        require_text("content", &input.content)?;

        let record = NewReplyRecord {
            id: new_id("reply"),
            comment_id: input.comment_id,
            owner: input.owner,
            content: input.content,
            date: now_utc_iso(),
        };
        let thread_id = input.thread_id;
        self.database.with_repositories(|repos| {
            if !repos.threads().exists(&thread_id)? {
                return Ok(Err(thread_not_found(&thread_id)));
            }
            if !repos
                .comments()
                .exists_in_thread(&thread_id, &record.comment_id)?
            {
                return Ok(Err(comment_not_found(&thread_id, &record.comment_id)));
            }
            repos.replies().create(&record)?;
            Ok(Ok(()))
        })??;
        tracing::info!(
            thread_id = %thread_id,
            comment_id = %record.comment_id,
            reply_id = %record.id,
            "reply added"
        );

        Ok(AddedReply {
            id: record.id,
            content: record.content,
            owner: record.owner,
        })
    }

    pub fn delete_reply(&self, thread_id: &str, comment_id: &str, reply_id: &str) -> ForumResult<()> {
        let deleted = self.database.with_repositories(|repos| {
            let replies = repos.replies();
            if !replies.exists(thread_id, comment_id, reply_id)? {
                return Ok(false);
            }
            replies.soft_delete(reply_id)?;
            Ok(true)
        })?;
        if !deleted {
            return Err(ForumError::not_found(format!(
                "reply {reply_id} not found under comment {comment_id}"
            )));
        }
        tracing::info!(thread_id = %thread_id, reply_id = %reply_id, "reply deleted");
        Ok(())
    }
}

fn thread_not_found(thread_id: &str) -> ForumError {
    ForumError::not_found(format!("thread {thread_id} not found"))
}

pub(crate) fn comment_not_found(thread_id: &str, comment_id: &str) -> ForumError {
    ForumError::not_found(format!(
        "comment {comment_id} not found in thread {thread_id}"
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub thread_id: String,
    pub content: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReply {
    pub thread_id: String,
    pub comment_id: String,
    pub content: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedReply {
    pub id: String,
    pub content: String,
    pub owner: String,
}
