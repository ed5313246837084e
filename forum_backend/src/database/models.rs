use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
}

/// Row as written to `threads`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewThreadRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub owner: String,
    pub date: String,
}

/// Thread joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommentRecord {
    pub id: String,
    pub thread_id: String,
    pub owner: String,
    pub content: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    pub thread_id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReplyRecord {
    pub id: String,
    pub comment_id: String,
    pub owner: String,
    pub content: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub id: String,
    pub comment_id: String,
    pub username: String,
    pub date: String,
    pub content: String,
    pub is_deleted: bool,
}

/// One active like; a comment's like count is the number of these rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
    pub comment_id: String,
}
