mod comments;
mod likes;
mod replies;
mod threads;
mod users;

use super::models::{
    CommentRecord, LikeRecord, NewCommentRecord, NewReplyRecord, NewThreadRecord, ReplyRecord,
    ThreadRecord, UserRecord,
};
use anyhow::Result;
use rusqlite::Connection;

pub trait UserRepository {
    fn create(&self, record: &UserRecord) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<UserRecord>>;
    fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>>;
}

pub trait ThreadRepository {
    fn create(&self, record: &NewThreadRecord) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<ThreadRecord>>;
    fn exists(&self, id: &str) -> Result<bool>;
    fn list_recent(&self, limit: usize) -> Result<Vec<ThreadRecord>>;
}

pub trait CommentRepository {
    fn create(&self, record: &NewCommentRecord) -> Result<()>;
    /// Oldest first.
    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<CommentRecord>>;
    fn exists_in_thread(&self, thread_id: &str, comment_id: &str) -> Result<bool>;
    fn soft_delete(&self, comment_id: &str) -> Result<()>;
}

pub trait ReplyRepository {
    fn create(&self, record: &NewReplyRecord) -> Result<()>;
    /// Every reply under every comment of the thread, oldest first.
    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<ReplyRecord>>;
    fn exists(&self, thread_id: &str, comment_id: &str, reply_id: &str) -> Result<bool>;
    fn soft_delete(&self, reply_id: &str) -> Result<()>;
}

pub trait LikeRepository {
    fn add(&self, comment_id: &str, owner: &str, date: &str) -> Result<()>;
    fn remove(&self, comment_id: &str, owner: &str) -> Result<()>;
    fn exists(&self, comment_id: &str, owner: &str) -> Result<bool>;
    /// One row per active like on any comment of the thread.
    fn list_for_thread(&self, thread_id: &str) -> Result<Vec<LikeRecord>>;
}

pub struct SqliteRepositories<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRepositories<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn users(&self) -> impl UserRepository + '_ {
        users::SqliteUserRepository { conn: self.conn }
    }

    pub fn threads(&self) -> impl ThreadRepository + '_ {
        threads::SqliteThreadRepository { conn: self.conn }
    }

    pub fn comments(&self) -> impl CommentRepository + '_ {
        comments::SqliteCommentRepository { conn: self.conn }
    }

    pub fn replies(&self) -> impl ReplyRepository + '_ {
        replies::SqliteReplyRepository { conn: self.conn }
    }

    pub fn likes(&self) -> impl LikeRepository + '_ {
        likes::SqliteLikeRepository { conn: self.conn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MIGRATIONS;

    fn setup_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        conn.execute_batch(MIGRATIONS).expect("migrations");
        conn
    }

    fn seed_thread(repos: &SqliteRepositories<'_>) {
        repos
            .users()
            .create(&UserRecord {
                id: "user-123".into(),
                username: "dicoding".into(),
            })
            .unwrap();
        repos
            .users()
            .create(&UserRecord {
                id: "user-456".into(),
                username: "jhon".into(),
            })
            .unwrap();
        repos
            .threads()
            .create(&NewThreadRecord {
                id: "thread-123".into(),
                title: "ini adalah judul thread".into(),
                body: "ini adalah isi thread".into(),
                owner: "user-123".into(),
                date: "2024-01-01T00:00:00Z".into(),
            })
            .unwrap();
        repos
            .comments()
            .create(&NewCommentRecord {
                id: "comment-123".into(),
                thread_id: "thread-123".into(),
                owner: "user-123".into(),
                content: "ini adalah isi komentar".into(),
                date: "2024-01-01T00:01:00Z".into(),
            })
            .unwrap();
    }

    #[test]
    fn thread_lookup_joins_username() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);
        seed_thread(&repos);

        let thread = repos.threads().get("thread-123").unwrap().unwrap();
        assert_eq!(thread.username, "dicoding");
        assert_eq!(thread.body, "ini adalah isi thread");
        assert!(repos.threads().exists("thread-123").unwrap());
        assert!(repos.threads().get("thread-999").unwrap().is_none());
        assert_eq!(repos.threads().list_recent(10).unwrap().len(), 1);
    }

    #[test]
    fn oversized_thread_limit_is_clamped() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);
        seed_thread(&repos);

        let threads = repos.threads().list_recent(usize::MAX).unwrap();
        assert_eq!(threads.len(), 1);
        assert!(repos.threads().list_recent(0).unwrap().is_empty());
    }

    #[test]
    fn soft_deleted_comment_stays_listed() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);
        seed_thread(&repos);

        repos.comments().soft_delete("comment-123").unwrap();
        let comments = repos.comments().list_for_thread("thread-123").unwrap();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].is_deleted);
        assert_eq!(comments[0].content, "ini adalah isi komentar");
        assert!(repos
            .comments()
            .exists_in_thread("thread-123", "comment-123")
            .unwrap());
        assert!(!repos
            .comments()
            .exists_in_thread("thread-999", "comment-123")
            .unwrap());
    }

    #[test]
    fn replies_are_listed_per_thread_with_comment_id() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);
        seed_thread(&repos);

        for (id, date) in [("reply-2", "2024-01-01T00:03:00Z"), ("reply-1", "2024-01-01T00:02:00Z")] {
            repos
                .replies()
                .create(&NewReplyRecord {
                    id: id.into(),
                    comment_id: "comment-123".into(),
                    owner: "user-456".into(),
                    content: format!("balasan {id}"),
                    date: date.into(),
                })
                .unwrap();
        }
        repos.replies().soft_delete("reply-2").unwrap();

        let replies = repos.replies().list_for_thread("thread-123").unwrap();
        let ids: Vec<_> = replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["reply-1", "reply-2"]);
        assert_eq!(replies[0].username, "jhon");
        assert_eq!(replies[0].comment_id, "comment-123");
        assert!(!replies[0].is_deleted);
        assert!(replies[1].is_deleted);
        assert!(repos
            .replies()
            .exists("thread-123", "comment-123", "reply-1")
            .unwrap());
        assert!(!repos
            .replies()
            .exists("thread-123", "comment-999", "reply-1")
            .unwrap());
    }

    #[test]
    fn likes_add_and_remove_rows() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);
        seed_thread(&repos);

        let likes = repos.likes();
        likes.add("comment-123", "user-123", "2024-01-01T00:05:00Z").unwrap();
        likes.add("comment-123", "user-456", "2024-01-01T00:06:00Z").unwrap();
        assert!(likes.exists("comment-123", "user-456").unwrap());
        assert_eq!(likes.list_for_thread("thread-123").unwrap().len(), 2);

        likes.remove("comment-123", "user-456").unwrap();
        let rows = likes.list_for_thread("thread-123").unwrap();
        assert_eq!(
            rows,
            vec![LikeRecord {
                comment_id: "comment-123".into()
            }]
        );
        assert!(likes.list_for_thread("thread-999").unwrap().is_empty());
    }

    #[test]
    fn users_resolve_by_username() {
        let conn = setup_conn();
        let repos = SqliteRepositories::new(&conn);
        seed_thread(&repos);

        let user = repos.users().get_by_username("jhon").unwrap().unwrap();
        assert_eq!(user.id, "user-456");
        assert_eq!(repos.users().get("user-123").unwrap().unwrap().username, "dicoding");
        assert!(repos.users().get_by_username("nobody").unwrap().is_none());
    }
}
