//! Notification models
//!
//! Events handed to the notification dispatcher after invite and membership writes.

use serde::{Deserialize, Serialize};

use super::id::{InviteId, RoomId, UserId};

/// Notification type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone invited the recipient into a room
    RoomInvite,
    /// The recipient's invite was accepted
    InviteAccepted,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomInvite => write!(f, "room_invite"),
            Self::InviteAccepted => write!(f, "invite_accepted"),
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room_invite" => Ok(Self::RoomInvite),
            "invite_accepted" => Ok(Self::InviteAccepted),
            _ => Err(format!("Invalid notification type: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NotificationEvent {
    RoomInvite {
        invite_id: InviteId,
        room_id: RoomId,
        room_name: String,
        sender_id: UserId,
        receiver_id: UserId,
    },
    InviteAccepted {
        invite_id: InviteId,
        room_id: RoomId,
        room_name: String,
        /// The original sender, who gets notified
        sender_id: UserId,
        accepted_by: UserId,
    },
}

impl NotificationEvent {
    pub fn notification_type(&self) -> NotificationType {
        match self {
            Self::RoomInvite { .. } => NotificationType::RoomInvite,
            Self::InviteAccepted { .. } => NotificationType::InviteAccepted,
        }
    }

    /// User the notification is addressed to
    pub fn recipient(&self) -> &UserId {
        match self {
            Self::RoomInvite { receiver_id, .. } => receiver_id,
            Self::InviteAccepted { sender_id, .. } => sender_id,
        }
    }
}
