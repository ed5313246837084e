use thiserror::Error;

/// Failure surfaced at the domain boundary.
///
/// Storage code keeps using `anyhow`; anything infrastructural is carried
/// through unchanged in [`ForumError::Collaborator`].
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("{0}")]
    NotFound(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl ForumError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ForumError::NotFound(what.into())
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ForumError::InvalidPayload(reason.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ForumError::NotFound(_))
    }
}

pub type ForumResult<T> = Result<T, ForumError>;
