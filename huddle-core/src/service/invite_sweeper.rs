//! Background invite expiry
//!
//! Invites are expired lazily whenever an operation trips over one. The
//! sweeper additionally flips every stale pending invite to `expired` on a
//! fixed interval so listings stay clean for rooms nobody touches.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{repository::InviteRepository, Result};

#[derive(Clone)]
pub struct InviteSweeper {
    invites: Arc<dyn InviteRepository>,
}

impl InviteSweeper {
    #[must_use]
    pub fn new(invites: Arc<dyn InviteRepository>) -> Self {
        Self { invites }
    }

    /// Expire every pending invite past its deadline, returning how many changed
    pub async fn sweep_once(&self) -> Result<u64> {
        let expired = self.invites.expire_stale(Utc::now()).await?;
        if expired > 0 {
            info!("Expired {} stale invites", expired);
        } else {
            debug!("No stale invites to expire");
        }
        Ok(expired)
    }

    /// Sweep every `every` until `shutdown` fires
    #[must_use]
    pub fn spawn(self, every: Duration, shutdown: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            // A zero period would make `interval` panic
            let mut interval = tokio::time::interval(every.max(Duration::from_millis(1)));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = shutdown.cancelled() => {
                        info!("Invite sweeper stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.sweep_once().await {
                            error!("Invite sweep failed: {}", e);
                        }
                    }
                }
            }
        })
    }
}
