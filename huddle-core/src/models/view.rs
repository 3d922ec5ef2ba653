use serde::Serialize;

use super::{InviteId, Room, RoomId, RoomInvite, RoomMembership, UserId};

/// Read model the UI renders from. Written only by the coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomsView {
    pub current_room: Option<Room>,
    pub my_rooms: Vec<Room>,
    pub room_participants: Vec<RoomMembership>,
    /// Pending invites addressed to the signed-in user
    pub room_invites: Vec<RoomInvite>,
}

impl RoomsView {
    pub fn is_current(&self, room_id: &RoomId) -> bool {
        self.current_room.as_ref().is_some_and(|r| &r.id == room_id)
    }

    pub fn upsert_room(&mut self, room: Room) {
        if let Some(current) = self.current_room.as_mut().filter(|r| r.id == room.id) {
            *current = room.clone();
        }
        match self.my_rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => *existing = room,
            None => self.my_rooms.push(room),
        }
    }

    /// Drop a room and everything cached about it
    pub fn remove_room(&mut self, room_id: &RoomId) {
        self.my_rooms.retain(|r| &r.id != room_id);
        self.room_invites.retain(|i| &i.room_id != room_id);
        if self.is_current(room_id) {
            self.current_room = None;
            self.room_participants.clear();
        }
    }

    pub fn remove_participant(&mut self, room_id: &RoomId, user_id: &UserId) {
        self.room_participants
            .retain(|m| !(&m.room_id == room_id && &m.user_id == user_id));
    }

    /// Replace or add a participant row; ignored unless its room is current
    pub fn upsert_participant(&mut self, membership: RoomMembership) {
        if !self.is_current(&membership.room_id) {
            return;
        }
        match self
            .room_participants
            .iter_mut()
            .find(|m| m.room_id == membership.room_id && m.user_id == membership.user_id)
        {
            Some(existing) => *existing = membership,
            None => self.room_participants.push(membership),
        }
    }

    pub fn remove_invite(&mut self, invite_id: &InviteId) -> Option<RoomInvite> {
        let pos = self.room_invites.iter().position(|i| &i.id == invite_id)?;
        Some(self.room_invites.remove(pos))
    }
}
