//! In-memory store
//!
//! Implements all three repositories over one set of tables for single-process
//! deployments and tests. The `(room_id, user_id)` and single-pending-invite
//! constraints are enforced the same way the Postgres schema enforces them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{InviteRepository, MembershipRepository, RoomRepository};
use crate::{
    models::{InviteId, InviteStatus, Room, RoomId, RoomInvite, RoomMembership, UserId},
    Error, Result,
};

#[derive(Debug, Default)]
struct Tables {
    rooms: HashMap<RoomId, Room>,
    participants: Vec<RoomMembership>,
    invites: HashMap<InviteId, RoomInvite>,
}

#[derive(Debug, Default)]
struct Counters {
    reads: AtomicU64,
    writes: AtomicU64,
    membership_inserts: AtomicU64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    counters: Arc<Counters>,
    latency: Duration,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `latency` before touching the tables, standing in
    /// for a remote round-trip.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Seed a room directly, bypassing capacity checks
    pub fn put_room(&self, room: Room) {
        self.tables.lock().rooms.insert(room.id.clone(), room);
    }

    /// Seed a membership directly
    pub fn put_membership(&self, membership: RoomMembership) {
        let mut tables = self.tables.lock();
        tables
            .participants
            .retain(|m| !(m.room_id == membership.room_id && m.user_id == membership.user_id));
        tables.participants.push(membership);
    }

    /// Seed an invite directly
    pub fn put_invite(&self, invite: RoomInvite) {
        self.tables.lock().invites.insert(invite.id.clone(), invite);
    }

    pub fn room(&self, room_id: &RoomId) -> Option<Room> {
        self.tables.lock().rooms.get(room_id).cloned()
    }

    pub fn invite(&self, invite_id: &InviteId) -> Option<RoomInvite> {
        self.tables.lock().invites.get(invite_id).cloned()
    }

    pub fn memberships(&self, room_id: &RoomId) -> Vec<RoomMembership> {
        self.tables
            .lock()
            .participants
            .iter()
            .filter(|m| &m.room_id == room_id)
            .cloned()
            .collect()
    }

    pub fn invites_for_room(&self, room_id: &RoomId) -> Vec<RoomInvite> {
        self.tables
            .lock()
            .invites
            .values()
            .filter(|i| &i.room_id == room_id)
            .cloned()
            .collect()
    }

    /// Total repository calls served
    pub fn call_count(&self) -> u64 {
        self.counters.reads.load(Ordering::SeqCst) + self.counters.writes.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> u64 {
        self.counters.writes.load(Ordering::SeqCst)
    }

    pub fn membership_insert_count(&self) -> u64 {
        self.counters.membership_inserts.load(Ordering::SeqCst)
    }

    async fn read(&self) {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await;
    }

    async fn write(&self) {
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await;
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn create(&self, room: &Room) -> Result<Room> {
        self.write().await;
        let mut tables = self.tables.lock();
        if tables.rooms.contains_key(&room.id) {
            return Err(Error::InvalidInput("Room already exists".to_string()));
        }
        tables.rooms.insert(room.id.clone(), room.clone());
        Ok(room.clone())
    }

    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>> {
        self.read().await;
        Ok(self.tables.lock().rooms.get(room_id).cloned())
    }

    async fn count_active_by_owner(&self, owner_id: &UserId) -> Result<i64> {
        self.read().await;
        let count = self
            .tables
            .lock()
            .rooms
            .values()
            .filter(|r| r.is_active && &r.creator_id == owner_id)
            .count();
        Ok(count as i64)
    }

    async fn list_by_member(&self, user_id: &UserId) -> Result<Vec<Room>> {
        self.read().await;
        let tables = self.tables.lock();
        let mut rooms: Vec<Room> = tables
            .participants
            .iter()
            .filter(|m| &m.user_id == user_id)
            .filter_map(|m| tables.rooms.get(&m.room_id))
            .filter(|r| r.is_active)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rooms)
    }

    async fn update_name(&self, room_id: &RoomId, name: &str) -> Result<Room> {
        self.write().await;
        let mut tables = self.tables.lock();
        let room = tables
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| Error::NotFound("Room not found".to_string()))?;
        room.name = name.to_string();
        Ok(room.clone())
    }

    async fn update_creator(&self, room_id: &RoomId, new_owner_id: &UserId) -> Result<Room> {
        self.write().await;
        let mut tables = self.tables.lock();
        let room = tables
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| Error::NotFound("Room not found".to_string()))?;
        room.creator_id = new_owner_id.clone();
        Ok(room.clone())
    }

    async fn delete(&self, room_id: &RoomId) -> Result<bool> {
        self.write().await;
        Ok(self.tables.lock().rooms.remove(room_id).is_some())
    }
}

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn insert(&self, membership: &RoomMembership) -> Result<(RoomMembership, bool)> {
        self.write().await;
        self.counters.membership_inserts.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock();
        if let Some(existing) = tables
            .participants
            .iter()
            .find(|m| m.room_id == membership.room_id && m.user_id == membership.user_id)
        {
            return Ok((existing.clone(), false));
        }
        tables.participants.push(membership.clone());
        Ok((membership.clone(), true))
    }

    async fn find(&self, room_id: &RoomId, user_id: &UserId) -> Result<Option<RoomMembership>> {
        self.read().await;
        Ok(self
            .tables
            .lock()
            .participants
            .iter()
            .find(|m| &m.room_id == room_id && &m.user_id == user_id)
            .cloned())
    }

    async fn count_by_room(&self, room_id: &RoomId) -> Result<i64> {
        self.read().await;
        let count = self
            .tables
            .lock()
            .participants
            .iter()
            .filter(|m| &m.room_id == room_id)
            .count();
        Ok(count as i64)
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<RoomMembership>> {
        self.read().await;
        let mut members = self.memberships(room_id);
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
        Ok(members)
    }

    async fn set_muted(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        is_muted: bool,
    ) -> Result<RoomMembership> {
        self.write().await;
        let mut tables = self.tables.lock();
        let membership = tables
            .participants
            .iter_mut()
            .find(|m| &m.room_id == room_id && &m.user_id == user_id)
            .ok_or_else(|| Error::NotFound("Not a member of this room".to_string()))?;
        membership.is_muted = is_muted;
        Ok(membership.clone())
    }

    async fn delete(&self, room_id: &RoomId, user_id: &UserId) -> Result<bool> {
        self.write().await;
        let mut tables = self.tables.lock();
        let before = tables.participants.len();
        tables
            .participants
            .retain(|m| !(&m.room_id == room_id && &m.user_id == user_id));
        Ok(tables.participants.len() < before)
    }

    async fn delete_by_room(&self, room_id: &RoomId) -> Result<u64> {
        self.write().await;
        let mut tables = self.tables.lock();
        let before = tables.participants.len();
        tables.participants.retain(|m| &m.room_id != room_id);
        Ok((before - tables.participants.len()) as u64)
    }
}

#[async_trait]
impl InviteRepository for MemoryStore {
    async fn create(&self, invite: &RoomInvite) -> Result<RoomInvite> {
        self.write().await;
        let mut tables = self.tables.lock();
        let pair_taken = invite.status.is_pending()
            && tables.invites.values().any(|i| {
                i.status.is_pending()
                    && i.room_id == invite.room_id
                    && i.receiver_id == invite.receiver_id
            });
        if pair_taken {
            return Err(Error::DuplicateInvite("Invite pending".to_string()));
        }
        tables.invites.insert(invite.id.clone(), invite.clone());
        Ok(invite.clone())
    }

    async fn find_by_id(&self, invite_id: &InviteId) -> Result<Option<RoomInvite>> {
        self.read().await;
        Ok(self.tables.lock().invites.get(invite_id).cloned())
    }

    async fn find_pending(
        &self,
        room_id: &RoomId,
        receiver_id: &UserId,
    ) -> Result<Option<RoomInvite>> {
        self.read().await;
        Ok(self
            .tables
            .lock()
            .invites
            .values()
            .find(|i| {
                i.status.is_pending() && &i.room_id == room_id && &i.receiver_id == receiver_id
            })
            .cloned())
    }

    async fn list_pending_for_room(&self, room_id: &RoomId) -> Result<Vec<RoomInvite>> {
        self.read().await;
        let mut invites: Vec<RoomInvite> = self
            .tables
            .lock()
            .invites
            .values()
            .filter(|i| i.status.is_pending() && &i.room_id == room_id)
            .cloned()
            .collect();
        invites.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(invites)
    }

    async fn list_pending_for_receiver(&self, receiver_id: &UserId) -> Result<Vec<RoomInvite>> {
        self.read().await;
        let mut invites: Vec<RoomInvite> = self
            .tables
            .lock()
            .invites
            .values()
            .filter(|i| i.status.is_pending() && &i.receiver_id == receiver_id)
            .cloned()
            .collect();
        invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invites)
    }

    async fn transition(&self, invite_id: &InviteId, status: InviteStatus) -> Result<bool> {
        if !InviteStatus::Pending.can_transition_to(status) {
            return Err(Error::InvalidInput(format!(
                "Cannot move an invite to {status}"
            )));
        }
        self.write().await;
        let mut tables = self.tables.lock();
        match tables.invites.get_mut(invite_id) {
            Some(invite) if invite.status.is_pending() => {
                invite.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_room(&self, room_id: &RoomId) -> Result<u64> {
        self.write().await;
        let mut tables = self.tables.lock();
        let before = tables.invites.len();
        tables.invites.retain(|_, i| &i.room_id != room_id);
        Ok((before - tables.invites.len()) as u64)
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64> {
        self.write().await;
        let mut expired = 0;
        for invite in self.tables.lock().invites.values_mut() {
            if invite.status.is_pending() && invite.is_expired(now) {
                invite.status = InviteStatus::Expired;
                expired += 1;
            }
        }
        Ok(expired)
    }
}
