//! Test helpers and fixtures for huddle-core tests
//!
//! Fixtures build models with sensible defaults; [`TestHarness`] wires a
//! coordinator over an in-memory store so service tests can run without a
//! database.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::{
    cache::InMemoryRoomsView,
    config::RoomsConfig,
    models::{NotificationEvent, Room, RoomId, RoomInvite, RoomMembership, Session, UserId},
    repository::MemoryStore,
    service::{ChannelNotifier, Repositories, RoomCoordinator, SessionStore},
};

/// Create a test user ID
pub fn test_user_id(id: &str) -> UserId {
    UserId::from_string(id.to_string())
}

/// Create a test room ID
pub fn test_room_id(id: &str) -> RoomId {
    RoomId::from_string(id.to_string())
}

/// Test fixture builder for Room
pub struct RoomFixture {
    id: RoomId,
    creator_id: UserId,
    is_active: bool,
}

impl RoomFixture {
    pub fn new() -> Self {
        Self {
            id: RoomId::new(),
            creator_id: UserId::new(),
            is_active: true,
        }
    }

    pub fn with_owner(mut self, creator_id: UserId) -> Self {
        self.creator_id = creator_id;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Room {
        Room {
            id: self.id,
            creator_id: self.creator_id,
            name: "Test Room".to_string(),
            is_active: self.is_active,
            is_private: false,
            created_at: Utc::now(),
        }
    }
}

impl Default for RoomFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Test fixture builder for RoomInvite
pub struct InviteFixture {
    room_id: RoomId,
    sender_id: UserId,
    receiver_id: UserId,
    ttl: Duration,
}

impl InviteFixture {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            sender_id: UserId::new(),
            receiver_id: UserId::new(),
            ttl: Duration::hours(24),
        }
    }

    pub fn from_user(mut self, sender_id: UserId) -> Self {
        self.sender_id = sender_id;
        self
    }

    pub fn to_user(mut self, receiver_id: UserId) -> Self {
        self.receiver_id = receiver_id;
        self
    }

    /// Already past its deadline
    pub fn expired(mut self) -> Self {
        self.ttl = Duration::seconds(-1);
        self
    }

    pub fn build(self) -> RoomInvite {
        RoomInvite::new(self.room_id, self.sender_id, self.receiver_id, self.ttl)
    }
}

/// Session that is valid for another hour
pub fn valid_session(user_id: &UserId) -> Session {
    Session::new(user_id.clone(), Utc::now() + Duration::hours(1))
}

/// Session that expired a minute ago
pub fn expired_session(user_id: &UserId) -> Session {
    Session::new(user_id.clone(), Utc::now() - Duration::minutes(1))
}

/// Coordinator over an in-memory store with a switchable session
pub struct TestHarness {
    pub store: MemoryStore,
    pub session: SessionStore,
    pub view: InMemoryRoomsView,
    pub coordinator: RoomCoordinator,
    pub events: mpsc::Receiver<NotificationEvent>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), RoomsConfig::default())
    }

    pub fn with_limits(limits: RoomsConfig) -> Self {
        Self::with_store(MemoryStore::new(), limits)
    }

    pub fn with_store(store: MemoryStore, limits: RoomsConfig) -> Self {
        let session = SessionStore::new();
        let view = InMemoryRoomsView::new();
        let (notifier, events) = ChannelNotifier::new(64);
        let coordinator = RoomCoordinator::new(
            Repositories::memory(store.clone()),
            Arc::new(session.clone()),
            Arc::new(notifier),
            Arc::new(view.clone()),
            limits,
        );
        Self {
            store,
            session,
            view,
            coordinator,
            events,
        }
    }

    /// Act as `user` from now on
    pub fn login(&self, user: &str) -> UserId {
        let user_id = test_user_id(user);
        self.session.set(valid_session(&user_id));
        user_id
    }

    pub fn expire_session(&self, user: &str) {
        self.session.set(expired_session(&test_user_id(user)));
    }

    /// Seed an active room owned by `owner` with `owner` plus `members` joined
    pub fn seed_room(&self, owner: &str, members: &[&str]) -> Room {
        let owner_id = test_user_id(owner);
        let room = RoomFixture::new().with_owner(owner_id.clone()).build();
        self.store.put_room(room.clone());
        self.store
            .put_membership(RoomMembership::new(room.id.clone(), owner_id));
        for member in members {
            self.store
                .put_membership(RoomMembership::new(room.id.clone(), test_user_id(member)));
        }
        room
    }

    /// Seed `count` generated members into `room`
    pub fn fill_room(&self, room: &Room, count: usize) {
        for n in 0..count {
            self.store.put_membership(RoomMembership::new(
                room.id.clone(),
                test_user_id(&format!("filler-{n}")),
            ));
        }
    }

    /// Drain every notification emitted so far
    pub fn drain_events(&mut self) -> Vec<NotificationEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
