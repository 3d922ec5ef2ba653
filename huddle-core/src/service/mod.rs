pub mod coordinator;
pub mod invite_sweeper;
pub mod join_guard;
pub mod notification;
pub mod session;


pub use coordinator::{Repositories, RoomCoordinator};
pub use invite_sweeper::InviteSweeper;
pub use join_guard::JoinGuard;
pub use notification::{dispatch_best_effort, ChannelNotifier, Notifier, TracingNotifier};
pub use session::{require_user, SessionGuard, SessionStore};

#[cfg(test)]
pub use notification::MockNotifier;
#[cfg(test)]
pub use session::MockSessionGuard;
