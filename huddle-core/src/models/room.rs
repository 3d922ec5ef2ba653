use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{RoomId, UserId};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Current owner. Changes on ownership transfer.
    pub creator_id: UserId,
    pub name: String,
    pub is_active: bool,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(name: String, creator_id: UserId, is_private: bool) -> Self {
        Self {
            id: RoomId::new(),
            creator_id,
            name,
            is_active: true,
            is_private,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }
}

/// Trim and validate a room name
pub fn normalize_room_name(name: &str, max_len: usize) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Room name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > max_len {
        return Err(Error::InvalidInput(format!(
            "Room name must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}
