use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    models::{InviteId, InviteStatus, RoomId, RoomInvite, UserId},
    Error, Result,
};

/// Storage for the `room_invites` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn create(&self, invite: &RoomInvite) -> Result<RoomInvite>;

    async fn find_by_id(&self, invite_id: &InviteId) -> Result<Option<RoomInvite>>;

    /// The invite stored as pending for this pair, expired or not
    async fn find_pending(
        &self,
        room_id: &RoomId,
        receiver_id: &UserId,
    ) -> Result<Option<RoomInvite>>;

    /// Invites stored as pending for a room
    async fn list_pending_for_room(&self, room_id: &RoomId) -> Result<Vec<RoomInvite>>;

    /// Invites stored as pending for a receiver
    async fn list_pending_for_receiver(&self, receiver_id: &UserId) -> Result<Vec<RoomInvite>>;

    /// Move a pending invite to `status`.
    ///
    /// Returns `false` when the invite was no longer pending.
    async fn transition(&self, invite_id: &InviteId, status: InviteStatus) -> Result<bool>;

    async fn delete_by_room(&self, room_id: &RoomId) -> Result<u64>;

    /// Mark every pending invite with `expires_at <= now` as expired
    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// Postgres-backed invite repository
#[derive(Clone)]
pub struct PgInviteRepository {
    pool: PgPool,
}

impl PgInviteRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_invite(&self, row: PgRow) -> Result<RoomInvite> {
        let status_str: String = row.try_get("status")?;
        let status = status_str
            .parse::<InviteStatus>()
            .map_err(Error::Internal)?;

        Ok(RoomInvite {
            id: InviteId::from_string(row.try_get("id")?),
            room_id: RoomId::from_string(row.try_get("room_id")?),
            sender_id: UserId::from_string(row.try_get("sender_id")?),
            receiver_id: UserId::from_string(row.try_get("receiver_id")?),
            status,
            created_at: row.try_get("created_at")?,
            expires_at: row.try_get("expires_at")?,
        })
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    async fn create(&self, invite: &RoomInvite) -> Result<RoomInvite> {
        let row = sqlx::query(
            "INSERT INTO room_invites (id, room_id, sender_id, receiver_id, status, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, room_id, sender_id, receiver_id, status, created_at, expires_at",
        )
        .bind(invite.id.as_str())
        .bind(invite.room_id.as_str())
        .bind(invite.sender_id.as_str())
        .bind(invite.receiver_id.as_str())
        .bind(invite.status.as_str())
        .bind(invite.created_at)
        .bind(invite.expires_at)
        .fetch_one(&self.pool)
        .await?;

        self.row_to_invite(row)
    }

    async fn find_by_id(&self, invite_id: &InviteId) -> Result<Option<RoomInvite>> {
        let row = sqlx::query(
            "SELECT id, room_id, sender_id, receiver_id, status, created_at, expires_at
             FROM room_invites
             WHERE id = $1",
        )
        .bind(invite_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_invite(row)?)),
            None => Ok(None),
        }
    }

    async fn find_pending(
        &self,
        room_id: &RoomId,
        receiver_id: &UserId,
    ) -> Result<Option<RoomInvite>> {
        let row = sqlx::query(
            "SELECT id, room_id, sender_id, receiver_id, status, created_at, expires_at
             FROM room_invites
             WHERE room_id = $1 AND receiver_id = $2 AND status = 'pending'",
        )
        .bind(room_id.as_str())
        .bind(receiver_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_invite(row)?)),
            None => Ok(None),
        }
    }

    async fn list_pending_for_room(&self, room_id: &RoomId) -> Result<Vec<RoomInvite>> {
        let rows = sqlx::query(
            "SELECT id, room_id, sender_id, receiver_id, status, created_at, expires_at
             FROM room_invites
             WHERE room_id = $1 AND status = 'pending'
             ORDER BY created_at ASC",
        )
        .bind(room_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_invite(row)).collect()
    }

    async fn list_pending_for_receiver(&self, receiver_id: &UserId) -> Result<Vec<RoomInvite>> {
        let rows = sqlx::query(
            "SELECT id, room_id, sender_id, receiver_id, status, created_at, expires_at
             FROM room_invites
             WHERE receiver_id = $1 AND status = 'pending'
             ORDER BY created_at DESC",
        )
        .bind(receiver_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_invite(row)).collect()
    }

    async fn transition(&self, invite_id: &InviteId, status: InviteStatus) -> Result<bool> {
        if !InviteStatus::Pending.can_transition_to(status) {
            return Err(Error::InvalidInput(format!(
                "Cannot move an invite to {status}"
            )));
        }

        let result = sqlx::query(
            "UPDATE room_invites SET status = $2
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(invite_id.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_room(&self, room_id: &RoomId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM room_invites WHERE room_id = $1")
            .bind(room_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE room_invites SET status = 'expired'
             WHERE status = 'pending' AND expires_at <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
