use crate::database::models::UserRecord;
use crate::database::repositories::UserRepository;
use crate::database::Database;
use crate::error::{ForumError, ForumResult};
use crate::utils::new_id;

/// Minimal user registry: a username maps to a stable user id.
#[derive(Clone)]
pub struct UserService {
    database: Database,
}

impl UserService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Returns the user with `username`, registering it on first use.
    pub fn ensure(&self, username: &str) -> ForumResult<UserRecord> {
        let username = username.trim();
        if username.is_empty() || username.chars().any(char::is_whitespace) {
            return Err(ForumError::invalid(
                "username must be non-empty and contain no whitespace",
            ));
        }

        let user = self.database.with_repositories(|repos| {
            let users = repos.users();
            if let Some(existing) = users.get_by_username(username)? {
                return Ok(existing);
            }
            let record = UserRecord {
                id: new_id("user"),
                username: username.to_owned(),
            };
            users.create(&record)?;
            tracing::info!(user_id = %record.id, username = %record.username, "user registered");
            Ok(record)
        })?;
        Ok(user)
    }
}
