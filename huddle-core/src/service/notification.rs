//! Notification dispatch
//!
//! Invite and membership writes hand events to a [`Notifier`]. Delivery is
//! best-effort: a failed dispatch is logged and never undoes the write that
//! triggered it.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{models::NotificationEvent, Error, Result};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: NotificationEvent) -> Result<()>;
}

/// Send `event` and swallow any failure
pub async fn dispatch_best_effort(notifier: &dyn Notifier, event: NotificationEvent) {
    let kind = event.notification_type();
    let recipient = event.recipient().clone();
    if let Err(e) = notifier.notify(event).await {
        tracing::warn!(%kind, %recipient, error = %e, "Notification dispatch failed");
    }
}

/// Logs events instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        let payload = serde_json::to_string(&event)
            .map_err(|e| Error::Internal(format!("Failed to encode notification: {e}")))?;
        tracing::info!(
            kind = %event.notification_type(),
            recipient = %event.recipient(),
            %payload,
            "Notification dispatched"
        );
        Ok(())
    }
}

/// Forwards events to a dispatch worker over a bounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<NotificationEvent>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end for the worker
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<NotificationEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, event: NotificationEvent) -> Result<()> {
        // Never wait on a slow worker
        self.tx.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                Error::Transient("Notification queue is full".to_string())
            }
            mpsc::error::TrySendError::Closed(_) => {
                Error::Transient("Notification worker stopped".to_string())
            }
        })
    }
}
