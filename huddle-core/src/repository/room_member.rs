use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    models::{MembershipId, RoomId, RoomMembership, UserId},
    Error, Result,
};

/// Storage for the `room_participants` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert unless `(room_id, user_id)` already exists.
    ///
    /// Returns the stored row and whether this call created it.
    async fn insert(&self, membership: &RoomMembership) -> Result<(RoomMembership, bool)>;

    async fn find(&self, room_id: &RoomId, user_id: &UserId) -> Result<Option<RoomMembership>>;

    async fn count_by_room(&self, room_id: &RoomId) -> Result<i64>;

    /// Members of a room in join order
    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<RoomMembership>>;

    async fn set_muted(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        is_muted: bool,
    ) -> Result<RoomMembership>;

    async fn delete(&self, room_id: &RoomId, user_id: &UserId) -> Result<bool>;

    async fn delete_by_room(&self, room_id: &RoomId) -> Result<u64>;
}

/// Postgres-backed membership repository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_membership(&self, row: PgRow) -> Result<RoomMembership> {
        Ok(RoomMembership {
            id: MembershipId::from_string(row.try_get("id")?),
            room_id: RoomId::from_string(row.try_get("room_id")?),
            user_id: UserId::from_string(row.try_get("user_id")?),
            is_muted: row.try_get("is_muted")?,
            joined_at: row.try_get("joined_at")?,
        })
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    async fn insert(&self, membership: &RoomMembership) -> Result<(RoomMembership, bool)> {
        // ON CONFLICT DO NOTHING returns no row when the pair already exists
        let inserted = sqlx::query(
            "INSERT INTO room_participants (id, room_id, user_id, is_muted, joined_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (room_id, user_id) DO NOTHING
             RETURNING id, room_id, user_id, is_muted, joined_at",
        )
        .bind(membership.id.as_str())
        .bind(membership.room_id.as_str())
        .bind(membership.user_id.as_str())
        .bind(membership.is_muted)
        .bind(membership.joined_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok((self.row_to_membership(row)?, true));
        }

        let existing = self
            .find(&membership.room_id, &membership.user_id)
            .await?
            .ok_or_else(|| Error::Transient("Membership vanished during insert".to_string()))?;
        Ok((existing, false))
    }

    async fn find(&self, room_id: &RoomId, user_id: &UserId) -> Result<Option<RoomMembership>> {
        let row = sqlx::query(
            "SELECT id, room_id, user_id, is_muted, joined_at
             FROM room_participants
             WHERE room_id = $1 AND user_id = $2",
        )
        .bind(room_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_membership(row)?)),
            None => Ok(None),
        }
    }

    async fn count_by_room(&self, room_id: &RoomId) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM room_participants WHERE room_id = $1")
                .bind(room_id.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<RoomMembership>> {
        let rows = sqlx::query(
            "SELECT id, room_id, user_id, is_muted, joined_at
             FROM room_participants
             WHERE room_id = $1
             ORDER BY joined_at ASC",
        )
        .bind(room_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| self.row_to_membership(row))
            .collect()
    }

    async fn set_muted(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
        is_muted: bool,
    ) -> Result<RoomMembership> {
        let row = sqlx::query(
            "UPDATE room_participants SET is_muted = $3
             WHERE room_id = $1 AND user_id = $2
             RETURNING id, room_id, user_id, is_muted, joined_at",
        )
        .bind(room_id.as_str())
        .bind(user_id.as_str())
        .bind(is_muted)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Not a member of this room".to_string()))?;

        self.row_to_membership(row)
    }

    async fn delete(&self, room_id: &RoomId, user_id: &UserId) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM room_participants WHERE room_id = $1 AND user_id = $2")
                .bind(room_id.as_str())
                .bind(user_id.as_str())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_room(&self, room_id: &RoomId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM room_participants WHERE room_id = $1")
            .bind(room_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
