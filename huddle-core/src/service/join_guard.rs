//! Per-member join coalescing
//!
//! Double taps and re-render races can fire several joins for the same room
//! from one client. The guard lets only the first one run; later callers
//! await its outcome. Flights are keyed on `(room, user)` so a session switch
//! mid-join starts a fresh flight for the new user. Entries are evicted once
//! the join settles.
//!
//! This is a client-side guard only. Joins racing from different devices are
//! caught by the store's `(room_id, user_id)` unique constraint.

use std::future::Future;
use std::sync::Arc;

use async_singleflight::Group;

use crate::{
    models::{RoomId, UserId},
    Error, Result,
};

type JoinKey = (RoomId, UserId);

#[derive(Clone)]
pub struct JoinGuard {
    group: Arc<Group<JoinKey, bool, Error>>,
}

impl std::fmt::Debug for JoinGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinGuard").finish()
    }
}

impl Default for JoinGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl JoinGuard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            group: Arc::new(Group::new()),
        }
    }

    /// Run `join` unless the same user's join into `room_id` is already in flight
    pub async fn join<Fut>(&self, room_id: RoomId, user_id: UserId, join: Fut) -> Result<bool>
    where
        Fut: Future<Output = Result<bool>> + Send,
    {
        // Err(None): the leading join was dropped before it settled
        self.group
            .work(&(room_id, user_id), join)
            .await
            .map_err(|err| {
                err.unwrap_or_else(|| {
                    Error::Transient("Join was interrupted, please retry".to_string())
                })
            })
    }
}
