//! Read-side collaborators consumed by the thread view assembler.
//!
//! Each trait covers one independently stored collection. The SQLite
//! implementation runs every query on the blocking pool so the four reads
//! can be awaited together.

use crate::database::models::{CommentRecord, LikeRecord, ReplyRecord, ThreadRecord};
use crate::database::repositories::{
    CommentRepository, LikeRepository, ReplyRepository, SqliteRepositories, ThreadRepository,
};
use crate::database::Database;
use crate::error::{ForumError, ForumResult};
use anyhow::Context;
use async_trait::async_trait;

#[async_trait]
pub trait ThreadSource: Send + Sync {
    /// Fails with [`ForumError::NotFound`] when the thread does not exist.
    async fn get_thread_by_id(&self, thread_id: &str) -> ForumResult<ThreadRecord>;
}

#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn get_comments_by_thread_id(&self, thread_id: &str) -> ForumResult<Vec<CommentRecord>>;
}

#[async_trait]
pub trait ReplySource: Send + Sync {
    async fn get_replies_by_thread_id(&self, thread_id: &str) -> ForumResult<Vec<ReplyRecord>>;
}

#[async_trait]
pub trait LikeSource: Send + Sync {
    /// One record per active like, tagged with the liked comment.
    async fn get_like_count_comment(&self, thread_id: &str) -> ForumResult<Vec<LikeRecord>>;
}

#[derive(Clone)]
pub struct SqliteForumSource {
    database: Database,
}

impl SqliteForumSource {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    async fn query<T, F>(&self, label: &'static str, f: F) -> ForumResult<T>
    where
        T: Send + 'static,
        F: FnOnce(SqliteRepositories<'_>) -> anyhow::Result<T> + Send + 'static,
    {
        let database = self.database.clone();
        let result = tokio::task::spawn_blocking(move || database.with_repositories(f))
            .await
            .with_context(|| format!("{label} query task failed"))?;
        result
            .with_context(|| format!("failed to load {label}"))
            .map_err(ForumError::from)
    }
}

#[async_trait]
impl ThreadSource for SqliteForumSource {
    async fn get_thread_by_id(&self, thread_id: &str) -> ForumResult<ThreadRecord> {
        let id = thread_id.to_owned();
        let thread = self
            .query("thread", move |repos| repos.threads().get(&id))
            .await?;
        thread.ok_or_else(|| ForumError::not_found(format!("thread {thread_id} not found")))
    }
}

#[async_trait]
impl CommentSource for SqliteForumSource {
    async fn get_comments_by_thread_id(&self, thread_id: &str) -> ForumResult<Vec<CommentRecord>> {
        let id = thread_id.to_owned();
        self.query("comments", move |repos| repos.comments().list_for_thread(&id))
            .await
    }
}

#[async_trait]
impl ReplySource for SqliteForumSource {
    async fn get_replies_by_thread_id(&self, thread_id: &str) -> ForumResult<Vec<ReplyRecord>> {
        let id = thread_id.to_owned();
        self.query("replies", move |repos| repos.replies().list_for_thread(&id))
            .await
    }
}

#[async_trait]
impl LikeSource for SqliteForumSource {
    async fn get_like_count_comment(&self, thread_id: &str) -> ForumResult<Vec<LikeRecord>> {
        let id = thread_id.to_owned();
        self.query("likes", move |repos| repos.likes().list_for_thread(&id))
            .await
    }
}
