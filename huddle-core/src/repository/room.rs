use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    models::{Room, RoomId, UserId},
    Error, Result,
};

/// Storage for the `rooms` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room
    async fn create(&self, room: &Room) -> Result<Room>;

    /// Get room by ID
    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>>;

    /// Number of active rooms currently owned by `owner_id`
    async fn count_active_by_owner(&self, owner_id: &UserId) -> Result<i64>;

    /// Active rooms the user holds a membership in, newest first
    async fn list_by_member(&self, user_id: &UserId) -> Result<Vec<Room>>;

    async fn update_name(&self, room_id: &RoomId, name: &str) -> Result<Room>;

    /// Point `creator_id` at a new owner in a single write
    async fn update_creator(&self, room_id: &RoomId, new_owner_id: &UserId) -> Result<Room>;

    /// Hard delete. Callers remove memberships and invites first.
    async fn delete(&self, room_id: &RoomId) -> Result<bool>;
}

/// Postgres-backed room repository
#[derive(Clone)]
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_room(&self, row: PgRow) -> Result<Room> {
        Ok(Room {
            id: RoomId::from_string(row.try_get("id")?),
            creator_id: UserId::from_string(row.try_get("creator_id")?),
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
            is_private: row.try_get("is_private")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    async fn create(&self, room: &Room) -> Result<Room> {
        let row = sqlx::query(
            "INSERT INTO rooms (id, creator_id, name, is_active, is_private, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, creator_id, name, is_active, is_private, created_at",
        )
        .bind(room.id.as_str())
        .bind(room.creator_id.as_str())
        .bind(&room.name)
        .bind(room.is_active)
        .bind(room.is_private)
        .bind(room.created_at)
        .fetch_one(&self.pool)
        .await?;

        self.row_to_room(row)
    }

    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>> {
        let row = sqlx::query(
            "SELECT id, creator_id, name, is_active, is_private, created_at
             FROM rooms
             WHERE id = $1",
        )
        .bind(room_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.row_to_room(row)?)),
            None => Ok(None),
        }
    }

    async fn count_active_by_owner(&self, owner_id: &UserId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rooms WHERE creator_id = $1 AND is_active = TRUE",
        )
        .bind(owner_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn list_by_member(&self, user_id: &UserId) -> Result<Vec<Room>> {
        let rows = sqlx::query(
            "SELECT r.id, r.creator_id, r.name, r.is_active, r.is_private, r.created_at
             FROM rooms r
             JOIN room_participants rp ON rp.room_id = r.id
             WHERE rp.user_id = $1 AND r.is_active = TRUE
             ORDER BY r.created_at DESC",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| self.row_to_room(row)).collect()
    }

    async fn update_name(&self, room_id: &RoomId, name: &str) -> Result<Room> {
        let row = sqlx::query(
            "UPDATE rooms SET name = $2
             WHERE id = $1
             RETURNING id, creator_id, name, is_active, is_private, created_at",
        )
        .bind(room_id.as_str())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Room not found".to_string()))?;

        self.row_to_room(row)
    }

    async fn update_creator(&self, room_id: &RoomId, new_owner_id: &UserId) -> Result<Room> {
        let row = sqlx::query(
            "UPDATE rooms SET creator_id = $2
             WHERE id = $1
             RETURNING id, creator_id, name, is_active, is_private, created_at",
        )
        .bind(room_id.as_str())
        .bind(new_owner_id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Room not found".to_string()))?;

        self.row_to_room(row)
    }

    async fn delete(&self, room_id: &RoomId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
