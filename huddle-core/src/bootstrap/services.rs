//! Service initialization and dependency injection

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    cache::InMemoryRoomsView,
    service::{InviteSweeper, Notifier, Repositories, RoomCoordinator, SessionStore},
    Config,
};

/// Container for the initialized services
#[derive(Clone)]
pub struct Services {
    /// Room and invite operations
    pub coordinator: RoomCoordinator,
    /// Session slot the auth layer writes into
    pub session: SessionStore,
    /// Rooms view the UI reads from
    pub view: InMemoryRoomsView,
    /// Cancel to stop background tasks
    pub shutdown: CancellationToken,
}

/// Wire the coordinator and start the invite sweeper
///
/// Must be called from within a Tokio runtime.
pub fn init_services(
    repos: Repositories,
    notifier: Arc<dyn Notifier>,
    config: &Config,
) -> Services {
    info!("Initializing services...");

    let session = SessionStore::new();
    let view = InMemoryRoomsView::new();
    let shutdown = CancellationToken::new();

    let coordinator = RoomCoordinator::new(
        repos.clone(),
        Arc::new(session.clone()),
        notifier,
        Arc::new(view.clone()),
        config.rooms.clone(),
    );

    // Detached; stops when `shutdown` is cancelled
    let _sweeper = InviteSweeper::new(repos.invites).spawn(
        config.rooms.sweep_interval(),
        shutdown.child_token(),
    );
    info!(
        interval_seconds = config.rooms.invite_sweep_interval_seconds,
        "Invite sweeper started"
    );

    Services {
        coordinator,
        session,
        view,
        shutdown,
    }
}
