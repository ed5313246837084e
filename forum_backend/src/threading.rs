use crate::assembler::{ThreadView, ThreadViewAssembler};
use crate::database::models::{NewThreadRecord, ThreadRecord};
use crate::database::repositories::ThreadRepository;
use crate::database::Database;
use crate::error::{ForumError, ForumResult};
use crate::sources::SqliteForumSource;
use crate::utils::{new_id, now_utc_iso};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct ThreadService {
    database: Database,
    assembler: ThreadViewAssembler,
}

impl ThreadService {
    pub fn new(database: Database) -> Self {
        let assembler = ThreadViewAssembler::from_source(SqliteForumSource::new(database.clone()));
        Self {
            database,
            assembler,
        }
    }

    pub fn list_threads(&self, limit: usize) -> ForumResult<Vec<ThreadSummary>> {
        let threads = self
            .database
            .with_repositories(|repos| repos.threads().list_recent(limit))?;
        Ok(threads.into_iter().map(ThreadSummary::from_record).collect())
    }

    pub async fn get_thread(&self, thread_id: &str) -> ForumResult<ThreadView> {
        self.assembler.assemble(thread_id).await
    }

    pub fn create_thread(&self, input: NewThread) -> ForumResult<AddedThread> {
        require_text("title", &input.title)?;
        require_text("body", &input.body)?;

        let record = NewThreadRecord {
            id: new_id("thread"),
            title: input.title,
            body: input.body,
            owner: input.owner,
            date: now_utc_iso(),
        };
        self.database
            .with_repositories(|repos| repos.threads().create(&record))?;
        tracing::info!(thread_id = %record.id, owner = %record.owner, "thread created");

        Ok(AddedThread {
            id: record.id,
            title: record.title,
            owner: record.owner,
        })
    }
}

/// Rejects blank text fields.
pub(crate) fn require_text(field: &str, value: &str) -> ForumResult<()> {
    if value.trim().is_empty() {
        return Err(ForumError::invalid(format!("{field} may not be empty")));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    /// User id of the author.
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub username: String,
}

impl ThreadSummary {
    fn from_record(record: ThreadRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            date: record.date,
            username: record.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserService;

    fn setup_service() -> (ThreadService, String) {
        let db = Database::open_in_memory().expect("in-memory db");
        let user = UserService::new(db.clone())
            .ensure("dicoding")
            .expect("user");
        (ThreadService::new(db), user.id)
    }

    #[tokio::test]
    async fn created_thread_is_viewable() {
        let (service, owner) = setup_service();
        let added = service
            .create_thread(NewThread {
                title: "ini adalah judul thread".into(),
                body: "ini adalah isi thread".into(),
                owner: owner.clone(),
            })
            .expect("create thread");
        assert!(added.id.starts_with("thread-"));
        assert_eq!(added.owner, owner);

        let view = service.get_thread(&added.id).await.expect("view");
        assert_eq!(view.title, "ini adalah judul thread");
        assert_eq!(view.body, "ini adalah isi thread");
        assert_eq!(view.username, "dicoding");
        assert!(view.comments.is_empty());

        let listed = service.list_threads(10).expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
    }

    #[test]
    fn blank_title_is_rejected() {
        let (service, owner) = setup_service();
        let err = service
            .create_thread(NewThread {
                title: "   ".into(),
                body: "isi".into(),
                owner,
            })
            .expect_err("blank title");
        assert!(matches!(err, ForumError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn unknown_thread_is_not_found() {
        let (service, _) = setup_service();
        let err = service.get_thread("thread-404").await.expect_err("missing");
        assert!(err.is_not_found());
    }
}
