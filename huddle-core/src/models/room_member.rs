use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MembershipId, RoomId, UserId};

/// A row of `room_participants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMembership {
    pub id: MembershipId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub is_muted: bool,
    pub joined_at: DateTime<Utc>,
}

impl RoomMembership {
    pub fn new(room_id: RoomId, user_id: UserId) -> Self {
        Self {
            id: MembershipId::new(),
            room_id,
            user_id,
            is_muted: false,
            joined_at: Utc::now(),
        }
    }
}
