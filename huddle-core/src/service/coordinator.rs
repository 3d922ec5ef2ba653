//! Room coordinator
//!
//! Entry point for everything the UI does with rooms: creation, membership,
//! ownership and the invite lifecycle. Each operation checks the session
//! first, re-reads authoritative state right before any authorization- or
//! capacity-sensitive write, and then projects the result into the rooms view.
//!
//! Capacity is enforced check-then-act. Two devices joining the last free
//! seat at the same moment can both pass the check; only the store's
//! `(room_id, user_id)` constraint is a hard guarantee.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    cache::RoomsViewStore,
    config::RoomsConfig,
    models::{
        normalize_room_name, BulkInviteReport, InviteId, InviteStatus, NotificationEvent, Room,
        RoomId, RoomInvite, RoomMembership, RoomsView, UserId,
    },
    repository::{InviteRepository, MembershipRepository, MemoryStore, RoomRepository},
    service::{
        join_guard::JoinGuard,
        notification::{dispatch_best_effort, Notifier},
        session::{require_user, SessionGuard},
    },
    Error, Result,
};

/// The three repositories the coordinator writes through
#[derive(Clone)]
pub struct Repositories {
    pub rooms: Arc<dyn RoomRepository>,
    pub members: Arc<dyn MembershipRepository>,
    pub invites: Arc<dyn InviteRepository>,
}

impl Repositories {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        members: Arc<dyn MembershipRepository>,
        invites: Arc<dyn InviteRepository>,
    ) -> Self {
        Self {
            rooms,
            members,
            invites,
        }
    }

    /// All three repositories backed by one in-memory store
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            rooms: store.clone(),
            members: store.clone(),
            invites: store,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        use crate::repository::{PgInviteRepository, PgMembershipRepository, PgRoomRepository};

        Self {
            rooms: Arc::new(PgRoomRepository::new(pool.clone())),
            members: Arc::new(PgMembershipRepository::new(pool.clone())),
            invites: Arc::new(PgInviteRepository::new(pool)),
        }
    }
}

const INVITE_DENIED: &str = "Must be in the room to invite";

#[derive(Clone)]
pub struct RoomCoordinator {
    repos: Repositories,
    session: Arc<dyn SessionGuard>,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn RoomsViewStore>,
    join_guard: JoinGuard,
    limits: RoomsConfig,
}

impl std::fmt::Debug for RoomCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomCoordinator")
            .field("limits", &self.limits)
            .finish()
    }
}

impl RoomCoordinator {
    pub fn new(
        repos: Repositories,
        session: Arc<dyn SessionGuard>,
        notifier: Arc<dyn Notifier>,
        view: Arc<dyn RoomsViewStore>,
        limits: RoomsConfig,
    ) -> Self {
        Self {
            repos,
            session,
            notifier,
            view,
            join_guard: JoinGuard::new(),
            limits,
        }
    }

    /// Snapshot of the rooms view
    pub fn rooms_view(&self) -> RoomsView {
        self.view.rooms_view()
    }

    // ==================== Creation & deletion ====================

    /// Create a room owned by the caller, who also becomes its first member
    pub async fn create_room(&self, name: &str, is_private: bool) -> Result<Room> {
        let user_id = self.current_user().await?;
        let name = normalize_room_name(name, self.limits.max_room_name_length)?;

        let owned = self.repos.rooms.count_active_by_owner(&user_id).await?;
        if owned >= i64::from(self.limits.max_owned_rooms) {
            debug!(%user_id, owned, "Room creation rejected: owner at room limit");
            return Err(Error::CapacityExceeded("Room Limit Reached".to_string()));
        }

        let room = self
            .repos
            .rooms
            .create(&Room::new(name, user_id.clone(), is_private))
            .await?;

        let membership = RoomMembership::new(room.id.clone(), user_id.clone());
        if let Err(e) = self.repos.members.insert(&membership).await {
            warn!(room_id = %room.id, error = %e, "Creator membership insert failed, removing room");
            if let Err(cleanup) = self.repos.rooms.delete(&room.id).await {
                tracing::error!(room_id = %room.id, error = %cleanup, "Failed to remove orphaned room");
            }
            return Err(e);
        }

        self.edit_view(|view| view.upsert_room(room.clone()));
        info!(room_id = %room.id, %user_id, "Room created");
        Ok(room)
    }

    /// Delete a room and everything hanging off it (creator only)
    pub async fn delete_room(&self, room_id: &RoomId) -> Result<()> {
        let user_id = self.current_user().await?;
        let room = self.load_room(room_id).await?;
        if !room.is_owned_by(&user_id) {
            return Err(Error::NotAuthorized(
                "Only the room creator can delete this room".to_string(),
            ));
        }

        let members = self.repos.members.delete_by_room(room_id).await?;
        let invites = self.repos.invites.delete_by_room(room_id).await?;
        self.repos.rooms.delete(room_id).await?;

        self.edit_view(|view| view.remove_room(room_id));
        info!(%room_id, members, invites, "Room deleted");
        Ok(())
    }

    /// Rename a room (creator only)
    pub async fn update_room_name(&self, room_id: &RoomId, name: &str) -> Result<Room> {
        let user_id = self.current_user().await?;
        let name = normalize_room_name(name, self.limits.max_room_name_length)?;
        let room = self.load_room(room_id).await?;
        if !room.is_owned_by(&user_id) {
            return Err(Error::NotAuthorized(
                "Only the room creator can rename this room".to_string(),
            ));
        }

        let updated = self.repos.rooms.update_name(room_id, &name).await?;
        self.edit_view(|view| view.upsert_room(updated.clone()));
        Ok(updated)
    }

    // ==================== Membership ====================

    /// Join a room. Concurrent joins by the same user into the same room share one attempt.
    pub async fn join_room(&self, room_id: &RoomId) -> Result<bool> {
        let user_id = self.current_user().await?;
        self.join_guard
            .join(
                room_id.clone(),
                user_id.clone(),
                self.join_unguarded(room_id, user_id),
            )
            .await
    }

    async fn join_unguarded(&self, room_id: &RoomId, user_id: UserId) -> Result<bool> {
        let room = self.load_active_room(room_id).await?;

        if let Some(existing) = self.repos.members.find(room_id, &user_id).await? {
            debug!(%room_id, %user_id, "Already a member, join treated as success");
            self.show_room(room, existing).await;
            return Ok(true);
        }

        let count = self.repos.members.count_by_room(room_id).await?;
        if count >= i64::from(self.limits.max_members) {
            debug!(%room_id, count, "Join rejected: room full");
            return Err(Error::CapacityExceeded("Room Full".to_string()));
        }

        // Another device may have joined between the read and the insert
        let (membership, created) = self
            .repos
            .members
            .insert(&RoomMembership::new(room_id.clone(), user_id.clone()))
            .await?;
        if created {
            info!(%room_id, %user_id, "Joined room");
        }

        self.show_room(room, membership).await;
        Ok(true)
    }

    /// Leave a room the caller belongs to
    pub async fn leave_room(&self, room_id: &RoomId) -> Result<()> {
        let user_id = self.current_user().await?;
        let removed = self.repos.members.delete(room_id, &user_id).await?;

        self.edit_view(|view| {
            view.my_rooms.retain(|r| &r.id != room_id);
            if view.is_current(room_id) {
                view.current_room = None;
                view.room_participants.clear();
            } else {
                view.remove_participant(room_id, &user_id);
            }
        });

        if !removed {
            return Err(Error::NotFound("Not a member of this room".to_string()));
        }
        info!(%room_id, %user_id, "Left room");
        Ok(())
    }

    /// Flip the caller's mute state in the current room and return the new state
    pub async fn toggle_mute(&self) -> Result<bool> {
        let user_id = self.current_user().await?;
        let room = self
            .view
            .rooms_view()
            .current_room
            .ok_or_else(|| Error::NotFound("You are not in a room".to_string()))?;

        let membership = self
            .repos
            .members
            .find(&room.id, &user_id)
            .await?
            .ok_or_else(|| Error::NotAuthorized("Not a member of this room".to_string()))?;
        let muted = !membership.is_muted;

        let flipped = RoomMembership {
            is_muted: muted,
            ..membership.clone()
        };
        self.edit_view(|view| view.upsert_participant(flipped.clone()));
        match self.repos.members.set_muted(&room.id, &user_id, muted).await {
            Ok(updated) => {
                let is_muted = updated.is_muted;
                self.edit_view(|view| view.upsert_participant(updated.clone()));
                Ok(is_muted)
            }
            Err(e) => {
                self.edit_view(|view| view.upsert_participant(membership.clone()));
                Err(e)
            }
        }
    }

    /// Remove another member from a room (creator only)
    pub async fn remove_participant(&self, room_id: &RoomId, target_user_id: &UserId) -> Result<bool> {
        let user_id = self.current_user().await?;
        if &user_id == target_user_id {
            return Err(Error::NotAuthorized(
                "Cannot remove yourself, use leave instead".to_string(),
            ));
        }

        let room = self.load_room(room_id).await?;
        if !room.is_owned_by(&user_id) {
            return Err(Error::NotAuthorized(
                "Only the room creator can remove participants".to_string(),
            ));
        }
        // The caller is the creator and the target is not the caller, so the
        // creator can never be the one removed here.

        if !self.repos.members.delete(room_id, target_user_id).await? {
            return Err(Error::NotFound("User is not a member of this room".to_string()));
        }

        self.edit_view(|view| view.remove_participant(room_id, target_user_id));
        info!(%room_id, removed = %target_user_id, "Participant removed");
        Ok(true)
    }

    /// Hand the room to another member. Memberships are left as they are.
    pub async fn transfer_ownership(&self, room_id: &RoomId, new_owner_id: &UserId) -> Result<Room> {
        let user_id = self.current_user().await?;
        if &user_id == new_owner_id {
            return Err(Error::InvalidInput("You already own this room".to_string()));
        }

        let room = self.load_room(room_id).await?;
        if !room.is_owned_by(&user_id) {
            return Err(Error::NotAuthorized(
                "Only the room creator can transfer ownership".to_string(),
            ));
        }

        if self.repos.members.find(room_id, new_owner_id).await?.is_none() {
            return Err(Error::NotAuthorized(
                "New owner must be a room member".to_string(),
            ));
        }

        if room.is_active {
            let owned = self.repos.rooms.count_active_by_owner(new_owner_id).await?;
            if owned >= i64::from(self.limits.max_owned_rooms) {
                return Err(Error::CapacityExceeded(
                    "New owner has reached the room limit".to_string(),
                ));
            }
        }

        let updated = self.repos.rooms.update_creator(room_id, new_owner_id).await?;
        self.edit_view(|view| view.upsert_room(updated.clone()));
        info!(%room_id, from = %user_id, to = %new_owner_id, "Ownership transferred");
        Ok(updated)
    }

    // ==================== Invites ====================

    /// Invite one user into a room the caller is in
    pub async fn send_invite(&self, room_id: &RoomId, receiver_id: &UserId) -> Result<RoomInvite> {
        let user_id = self.current_user().await?;
        if &user_id == receiver_id {
            return Err(Error::InvalidInput("You cannot invite yourself".to_string()));
        }

        let room = self.load_active_room(room_id).await?;
        self.require_member(room_id, &user_id, INVITE_DENIED).await?;

        if self.repos.members.find(room_id, receiver_id).await?.is_some() {
            return Err(Error::AlreadyMember("Already in the room".to_string()));
        }

        if let Some(existing) = self.repos.invites.find_pending(room_id, receiver_id).await? {
            if existing.is_open(Utc::now()) {
                return Err(Error::DuplicateInvite("Invite pending".to_string()));
            }
            self.expire_invite(&existing.id).await?;
        }

        let invite = self
            .repos
            .invites
            .create(&RoomInvite::new(
                room_id.clone(),
                user_id,
                receiver_id.clone(),
                self.limits.invite_ttl(),
            ))
            .await?;
        info!(invite_id = %invite.id, %room_id, receiver = %receiver_id, "Invite sent");

        self.notify_invite(&room, &invite).await;
        Ok(invite)
    }

    /// Invite several users at once, skipping anyone already invited or in the room
    pub async fn send_bulk_invites(
        &self,
        room_id: &RoomId,
        receiver_ids: &[UserId],
    ) -> Result<BulkInviteReport> {
        let user_id = self.current_user().await?;

        let mut seen = HashSet::new();
        let candidates: Vec<&UserId> = receiver_ids
            .iter()
            .filter(|id| *id != &user_id && seen.insert(*id))
            .collect();
        if candidates.is_empty() {
            return Err(Error::InvalidInput("No one to invite".to_string()));
        }

        let room = self.load_active_room(room_id).await?;
        self.require_member(room_id, &user_id, INVITE_DENIED).await?;

        let members: HashSet<UserId> = self
            .repos
            .members
            .list_by_room(room_id)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();
        let pending = self.repos.invites.list_pending_for_room(room_id).await?;

        let now = Utc::now();
        let mut report = BulkInviteReport::default();
        let mut fresh = Vec::new();
        let mut stale = Vec::new();
        for receiver in candidates {
            if members.contains(receiver) {
                report.already_members.push(receiver.clone());
                continue;
            }
            match pending.iter().find(|i| &i.receiver_id == receiver) {
                Some(invite) if invite.is_open(now) => {
                    report.already_invited.push(receiver.clone());
                }
                Some(invite) => {
                    stale.push(invite.id.clone());
                    fresh.push(receiver.clone());
                }
                None => fresh.push(receiver.clone()),
            }
        }

        if fresh.is_empty() {
            return Err(Error::DuplicateInvite("Already Invited".to_string()));
        }

        for invite_id in &stale {
            self.expire_invite(invite_id).await?;
        }

        let ttl = self.limits.invite_ttl();
        for receiver in fresh {
            let invite = RoomInvite::new(room_id.clone(), user_id.clone(), receiver.clone(), ttl);
            match self.repos.invites.create(&invite).await {
                Ok(created) => report.invited.push(created),
                // Lost a race with another sender
                Err(Error::DuplicateInvite(_)) => report.already_invited.push(receiver),
                Err(e) => {
                    warn!(%room_id, sent = report.count(), error = %e, "Bulk invite aborted");
                    return Err(e);
                }
            }
        }

        if report.invited.is_empty() {
            return Err(Error::DuplicateInvite("Already Invited".to_string()));
        }

        futures::future::join_all(
            report
                .invited
                .iter()
                .map(|invite| self.notify_invite(&room, invite)),
        )
        .await;
        info!(
            %room_id,
            invited = report.count(),
            skipped = report.already_invited.len() + report.already_members.len(),
            "Bulk invites sent"
        );
        Ok(report)
    }

    /// Accept an invite addressed to the caller
    ///
    /// Room capacity is checked now, not when the invite was sent. A full
    /// room leaves the invite pending so it can be accepted later.
    pub async fn accept_invite(&self, invite_id: &InviteId) -> Result<RoomMembership> {
        let user_id = self.current_user().await?;
        let invite = self.load_invite(invite_id).await?;
        if invite.receiver_id != user_id {
            return Err(Error::NotAuthorized(
                "This invite is not addressed to you".to_string(),
            ));
        }
        self.ensure_open(&invite).await?;

        let room = match self.repos.rooms.find_by_id(&invite.room_id).await? {
            Some(room) if room.is_active => room,
            _ => {
                self.forget_invite(invite_id);
                return Err(Error::NotFound("Room is no longer available".to_string()));
            }
        };

        let count = self.repos.members.count_by_room(&room.id).await?;
        if count >= i64::from(self.limits.max_members)
            && self.repos.members.find(&room.id, &user_id).await?.is_none()
        {
            debug!(%invite_id, room_id = %room.id, count, "Accept rejected: room full");
            return Err(Error::CapacityExceeded("Room Full".to_string()));
        }

        let (membership, created) = self
            .repos
            .members
            .insert(&RoomMembership::new(room.id.clone(), user_id.clone()))
            .await?;

        // The invite may have been cancelled or declined while we were inserting
        match self
            .repos
            .invites
            .transition(invite_id, InviteStatus::Accepted)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                if created {
                    self.undo_membership(&membership).await;
                }
                self.forget_invite(invite_id);
                debug!(%invite_id, "Accept lost race with another status change");
                return Err(Error::NotFound("Invite is no longer pending".to_string()));
            }
            Err(e) => {
                if created {
                    self.undo_membership(&membership).await;
                }
                return Err(e);
            }
        }

        self.forget_invite(invite_id);
        info!(%invite_id, room_id = %room.id, %user_id, "Invite accepted");

        dispatch_best_effort(
            self.notifier.as_ref(),
            NotificationEvent::InviteAccepted {
                invite_id: invite.id.clone(),
                room_id: room.id.clone(),
                room_name: room.name.clone(),
                sender_id: invite.sender_id.clone(),
                accepted_by: user_id,
            },
        )
        .await;

        self.show_room(room, membership.clone()).await;
        Ok(membership)
    }

    /// Decline an invite addressed to the caller
    pub async fn decline_invite(&self, invite_id: &InviteId) -> Result<()> {
        let user_id = self.current_user().await?;
        let invite = self.load_invite(invite_id).await?;
        if invite.receiver_id != user_id {
            return Err(Error::NotAuthorized(
                "Only the invited user can decline this invite".to_string(),
            ));
        }

        self.resolve_invite(&invite, InviteStatus::Declined).await?;
        info!(%invite_id, "Invite declined");
        Ok(())
    }

    /// Withdraw a pending invite (its sender or the room creator)
    pub async fn cancel_invite(&self, invite_id: &InviteId) -> Result<()> {
        let user_id = self.current_user().await?;
        let invite = self.load_invite(invite_id).await?;
        if invite.sender_id != user_id {
            let is_creator = self
                .repos
                .rooms
                .find_by_id(&invite.room_id)
                .await?
                .is_some_and(|room| room.is_owned_by(&user_id));
            if !is_creator {
                return Err(Error::NotAuthorized(
                    "Only the sender can cancel this invite".to_string(),
                ));
            }
        }

        self.resolve_invite(&invite, InviteStatus::Cancelled).await?;
        info!(%invite_id, "Invite cancelled");
        Ok(())
    }

    // ==================== View loaders ====================

    /// Reload the rooms the caller belongs to
    pub async fn refresh_my_rooms(&self) -> Result<Vec<Room>> {
        let user_id = self.current_user().await?;
        let rooms = self.repos.rooms.list_by_member(&user_id).await?;

        self.edit_view(|view| {
            view.my_rooms = rooms.clone();
            let still_member = view
                .current_room
                .as_ref()
                .is_some_and(|current| rooms.iter().any(|r| r.id == current.id));
            if !still_member {
                view.current_room = None;
                view.room_participants.clear();
            }
        });
        Ok(rooms)
    }

    /// Reload a room's participants
    pub async fn load_participants(&self, room_id: &RoomId) -> Result<Vec<RoomMembership>> {
        self.current_user().await?;
        let participants = self.repos.members.list_by_room(room_id).await?;
        self.edit_view(|view| {
            if view.is_current(room_id) {
                view.room_participants = participants.clone();
            }
        });
        Ok(participants)
    }

    /// Reload open invites addressed to the caller
    pub async fn load_pending_invites(&self) -> Result<Vec<RoomInvite>> {
        let user_id = self.current_user().await?;
        let now = Utc::now();
        let invites: Vec<RoomInvite> = self
            .repos
            .invites
            .list_pending_for_receiver(&user_id)
            .await?
            .into_iter()
            .filter(|invite| invite.is_open(now))
            .collect();

        self.edit_view(|view| view.room_invites = invites.clone());
        Ok(invites)
    }

    /// Make a room the caller already belongs to the current room
    pub async fn enter_room(&self, room_id: &RoomId) -> Result<Room> {
        let user_id = self.current_user().await?;
        let room = self.load_active_room(room_id).await?;
        let membership = self
            .require_member(room_id, &user_id, "Not a member of this room")
            .await?;
        self.show_room(room.clone(), membership).await;
        Ok(room)
    }

    // ==================== Helpers ====================

    async fn current_user(&self) -> Result<UserId> {
        require_user(self.session.as_ref()).await
    }

    fn edit_view(&self, mut edit: impl FnMut(&mut RoomsView)) {
        self.view.update(&mut edit);
    }

    async fn load_room(&self, room_id: &RoomId) -> Result<Room> {
        self.repos
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| Error::NotFound("Room not found".to_string()))
    }

    async fn load_active_room(&self, room_id: &RoomId) -> Result<Room> {
        let room = self.load_room(room_id).await?;
        if !room.is_active {
            return Err(Error::NotFound("Room is no longer active".to_string()));
        }
        Ok(room)
    }

    async fn require_member(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        denied: &str,
    ) -> Result<RoomMembership> {
        self.repos
            .members
            .find(room_id, user_id)
            .await?
            .ok_or_else(|| Error::NotAuthorized(denied.to_string()))
    }

    async fn load_invite(&self, invite_id: &InviteId) -> Result<RoomInvite> {
        match self.repos.invites.find_by_id(invite_id).await? {
            Some(invite) => Ok(invite),
            None => {
                self.forget_invite(invite_id);
                Err(Error::NotFound("Invite not found".to_string()))
            }
        }
    }

    /// Fail unless the invite is still open, recording lazy expiry on the way
    async fn ensure_open(&self, invite: &RoomInvite) -> Result<()> {
        if !invite.status.is_pending() {
            self.forget_invite(&invite.id);
            return Err(Error::NotFound("Invite is no longer pending".to_string()));
        }
        if invite.is_expired(Utc::now()) {
            if let Err(e) = self.expire_invite(&invite.id).await {
                warn!(invite_id = %invite.id, error = %e, "Failed to record invite expiry");
            }
            self.forget_invite(&invite.id);
            return Err(Error::NotFound("Invite expired".to_string()));
        }
        Ok(())
    }

    /// Decline or cancel. The cached copy is dropped up front and restored if
    /// the write fails.
    async fn resolve_invite(&self, invite: &RoomInvite, status: InviteStatus) -> Result<()> {
        self.ensure_open(invite).await?;

        let mut cached = None;
        self.edit_view(|view| cached = view.remove_invite(&invite.id));

        match self.repos.invites.transition(&invite.id, status).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::NotFound("Invite is no longer pending".to_string())),
            Err(e) => {
                if let Some(restored) = cached.take() {
                    self.edit_view(|view| view.room_invites.push(restored.clone()));
                }
                Err(e)
            }
        }
    }

    async fn expire_invite(&self, invite_id: &InviteId) -> Result<()> {
        if self
            .repos
            .invites
            .transition(invite_id, InviteStatus::Expired)
            .await?
        {
            debug!(%invite_id, "Invite expired");
        }
        Ok(())
    }

    fn forget_invite(&self, invite_id: &InviteId) {
        self.edit_view(|view| {
            view.remove_invite(invite_id);
        });
    }

    /// Roll back a membership this call inserted
    async fn undo_membership(&self, membership: &RoomMembership) {
        if let Err(e) = self
            .repos
            .members
            .delete(&membership.room_id, &membership.user_id)
            .await
        {
            tracing::error!(
                room_id = %membership.room_id,
                user_id = %membership.user_id,
                error = %e,
                "Failed to roll back membership after invite race"
            );
        }
    }

    /// Make `room` current and refresh its participants. The caller's own
    /// membership is enough if the participant read fails.
    async fn show_room(&self, room: Room, membership: RoomMembership) {
        let participants = match self.repos.members.list_by_room(&room.id).await {
            Ok(list) => list,
            Err(e) => {
                warn!(room_id = %room.id, error = %e, "Participant refresh failed");
                vec![membership]
            }
        };

        self.edit_view(|view| {
            view.upsert_room(room.clone());
            view.current_room = Some(room.clone());
            view.room_participants = participants.clone();
        });
    }

    async fn notify_invite(&self, room: &Room, invite: &RoomInvite) {
        dispatch_best_effort(
            self.notifier.as_ref(),
            NotificationEvent::RoomInvite {
                invite_id: invite.id.clone(),
                room_id: room.id.clone(),
                room_name: room.name.clone(),
                sender_id: invite.sender_id.clone(),
                receiver_id: invite.receiver_id.clone(),
            },
        )
        .await;
    }
}
