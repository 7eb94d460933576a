//! SQLite implementation of the key store.
//!
//! Both mutations rely on SQLite for atomicity instead of an in-process lock:
//! - `create_if_absent` inserts with `ON CONFLICT(id) DO NOTHING` and reads the
//!   row back inside one transaction, so concurrent logins for the same id
//!   converge on a single row.
//! - `assign_destination_and_key` is one conditional `UPDATE ... WHERE send_key
//!   IS NULL`; at most one caller can observe `rows_affected() == 1`.

use crate::{Database, DbError, KeyStore, Result as DbErrorResult};

use tp_core::{ChatId, DestinationLink, SendKey, User};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    chat_id: Option<i64>,
    send_key: Option<String>,
    created_at: i64,
    linked_at: Option<i64>,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: UserRow) -> DbErrorResult<Self> {
        let created_at = timestamp(row.id, "created_at", row.created_at)?;

        let link = match (row.chat_id, row.send_key, row.linked_at) {
            (None, None, _) => None,
            (Some(chat_id), Some(send_key), linked_at) => Some(DestinationLink {
                chat_id: ChatId(chat_id),
                send_key: SendKey::new(send_key),
                // Rows linked before linked_at existed fall back to creation time
                linked_at: match linked_at {
                    Some(ts) => timestamp(row.id, "linked_at", ts)?,
                    None => created_at,
                },
            }),
            _ => {
                return Err(DbError::Corrupt {
                    user_id: row.id,
                    message: "chat_id and send_key must be set together".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        Ok(User {
            id: row.id,
            first_name: row.first_name,
            link,
            created_at,
        })
    }
}

#[track_caller]
fn timestamp(user_id: i64, column: &str, value: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0).ok_or_else(|| DbError::Corrupt {
        user_id,
        message: format!("invalid timestamp in users.{}: {}", column, value),
        location: ErrorLocation::from(Location::caller()),
    })
}

const SELECT_USER: &str = r#"
    SELECT id, first_name, chat_id, send_key, created_at, linked_at
    FROM users
"#;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn from_database(database: &Database) -> Self {
        Self::new(database.pool().clone())
    }

    /// Number of stored users
    pub async fn count(&self) -> DbErrorResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl KeyStore for UserRepository {
    async fn get_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn get_by_send_key(&self, key: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE send_key = ?"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn create_if_absent(&self, id: i64, first_name: &str) -> DbErrorResult<User> {
        let pending = User::pending(id, first_name)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
                INSERT INTO users (id, first_name, created_at)
                VALUES (?, ?, ?)
                ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(pending.id)
        .bind(&pending.first_name)
        .bind(pending.created_at.timestamp())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        User::try_from(row)
    }

    async fn assign_destination_and_key(
        &self,
        id: i64,
        chat_id: ChatId,
        key: &SendKey,
    ) -> DbErrorResult<bool> {
        let linked_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                UPDATE users
                SET chat_id = ?, send_key = ?, linked_at = ?
                WHERE id = ? AND send_key IS NULL
            "#,
        )
        .bind(chat_id.0)
        .bind(key.as_str())
        .bind(linked_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
