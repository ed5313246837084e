use crate::comments::comment_not_found;
use crate::database::repositories::{CommentRepository, LikeRepository};
use crate::database::Database;
use crate::error::ForumResult;
use crate::utils::now_utc_iso;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    Liked,
    Unliked,
}

#[derive(Clone)]
pub struct LikeService {
    database: Database,
}

impl LikeService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Likes the comment, or removes the like if `owner` already liked it.
    pub fn toggle_like(&self, thread_id: &str, comment_id: &str, owner: &str) -> ForumResult<LikeState> {
        let state = self.database.with_repositories(|repos| {
            if !repos.comments().exists_in_thread(thread_id, comment_id)? {
                return Ok(None);
            }
            let likes = repos.likes();
            if likes.exists(comment_id, owner)? {
                likes.remove(comment_id, owner)?;
                Ok(Some(LikeState::Unliked))
            } else {
                likes.add(comment_id, owner, &now_utc_iso())?;
                Ok(Some(LikeState::Liked))
            }
        })?;
        let state = state.ok_or_else(|| comment_not_found(thread_id, comment_id))?;
        tracing::info!(comment_id = %comment_id, owner = %owner, state = ?state, "like toggled");
        Ok(state)
    }
}
