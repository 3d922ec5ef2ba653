//! Room invite model
//!
//! Invites move from `Pending` to exactly one terminal status. A pending invite
//! whose `expires_at` has passed is treated as expired wherever it is read,
//! whether or not the sweep has rewritten the stored status yet.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::id::{InviteId, RoomId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Cancelled,
    Expired,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    /// Terminal statuses absorb; only `Pending` may move, and only forward.
    pub fn can_transition_to(&self, next: Self) -> bool {
        self.is_pending() && next.is_terminal()
    }
}

impl FromStr for InviteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            _ => Err(format!("Unknown invite status: {s}")),
        }
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInvite {
    pub id: InviteId,
    pub room_id: RoomId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RoomInvite {
    pub fn new(room_id: RoomId, sender_id: UserId, receiver_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: InviteId::new(),
            room_id,
            sender_id,
            receiver_id,
            status: InviteStatus::Pending,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Status as observed at `now`, folding in lazy expiry
    pub fn effective_status(&self, now: DateTime<Utc>) -> InviteStatus {
        if self.status.is_pending() && self.is_expired(now) {
            InviteStatus::Expired
        } else {
            self.status
        }
    }

    /// Pending and not yet past its expiry
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now).is_pending()
    }
}

/// Outcome of a bulk invite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkInviteReport {
    pub invited: Vec<RoomInvite>,
    pub already_invited: Vec<UserId>,
    pub already_members: Vec<UserId>,
}

impl BulkInviteReport {
    /// Number of invites actually sent
    pub fn count(&self) -> usize {
        self.invited.len()
    }
}
