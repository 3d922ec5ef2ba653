//! Session guard
//!
//! Every mutating coordinator call asks the guard for the caller's session
//! before touching a repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::{
    models::{Session, SessionState, UserId},
    Error, Result,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionGuard: Send + Sync {
    async fn current_session(&self) -> SessionState;
}

/// Resolve the guard's state into the caller's user id
pub async fn require_user(guard: &dyn SessionGuard) -> Result<UserId> {
    match guard.current_session().await {
        SessionState::Valid(session) => Ok(session.user_id),
        SessionState::Expired => Err(Error::SessionExpired),
        SessionState::Anonymous => Err(Error::AuthRequired),
    }
}

/// Holds the session handed over by the auth layer
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    session: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session);
        store
    }

    pub fn set(&self, session: Session) {
        tracing::debug!(user_id = %session.user_id, expires_at = %session.expires_at, "Session installed");
        *self.session.write() = Some(session);
    }

    pub fn clear(&self) {
        *self.session.write() = None;
    }
}

#[async_trait]
impl SessionGuard for SessionStore {
    async fn current_session(&self) -> SessionState {
        match self.session.read().as_ref() {
            None => SessionState::Anonymous,
            Some(session) if session.is_expired(Utc::now()) => SessionState::Expired,
            Some(session) => SessionState::Valid(session.clone()),
        }
    }
}
