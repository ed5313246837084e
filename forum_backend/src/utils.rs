//! Shared helpers and constants.

use chrono::Utc;
use uuid::Uuid;

pub const APP_NAME: &str = "forum_backend";

pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Builds a record id such as `comment-3f0c...`.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_their_prefix() {
        let id = new_id("reply");
        assert!(id.starts_with("reply-"));
        assert_ne!(id, new_id("reply"));
    }
}
