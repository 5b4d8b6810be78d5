//! The logged-in session record.

use chrono::{DateTime, Utc};
use expapp_shared::types::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is currently logged in. Absence of this record means logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The authenticated user.
    pub user_id: UserId,
    /// Opaque token, regenerated on every login.
    pub token: String,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Opens a fresh session for a user.
    #[must_use]
    pub fn open(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token: Uuid::new_v4().simple().to_string(),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_generates_distinct_tokens() {
        let user = UserId::from_u128(1);
        let a = SessionRecord::open(user, Utc::now());
        let b = SessionRecord::open(user, Utc::now());
        assert_eq!(a.user_id, user);
        assert_eq!(a.token.len(), 32);
        assert_ne!(a.token, b.token);
    }
}
