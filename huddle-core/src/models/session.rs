use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// An authenticated session as handed over by the auth backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self { user_id, expires_at }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// What the session guard reports before a mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Valid(Session),
    Expired,
    Anonymous,
}
