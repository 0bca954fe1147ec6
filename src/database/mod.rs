use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use teloxide::types::UserId;

use crate::models::Role;

#[derive(Clone, Debug)]
pub struct Database {
    pub pool: PgPool,
}

/// Faults of the user directory. `DuplicateUser` or `UserNotFound` surfacing
/// in a normal flow points at a collaborator bug, so both carry the id.
#[derive(Debug)]
pub enum DirectoryError {
    Database(String),
    DuplicateUser(UserId),
    UserNotFound(UserId),
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryError::Database(e) => write!(f, "Database error: {}", e),
            DirectoryError::DuplicateUser(id) => write!(f, "User {} is already registered", id),
            DirectoryError::UserNotFound(id) => write!(f, "User {} is not registered", id),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        DirectoryError::Database(err.to_string())
    }
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    pub async fn init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS telegram_users (
                id BIGINT PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'guest',
                created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// True iff a record exists for this telegram user.
    pub async fn has_user(&self, id: UserId) -> Result<bool, DirectoryError> {
        let row = sqlx::query("SELECT id FROM telegram_users WHERE id = $1")
            .bind(id.0 as i64)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Register a user. Fails with `DuplicateUser` when the id is taken;
    /// callers wanting idempotence check `has_user` first.
    pub async fn insert_user(
        &self,
        id: UserId,
        name: &str,
        role: Role,
    ) -> Result<(), DirectoryError> {
        let result = sqlx::query("INSERT INTO telegram_users (id, name, role) VALUES ($1, $2, $3)")
            .bind(id.0 as i64)
            .bind(name)
            .bind(role.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DirectoryError::DuplicateUser(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn user_role(&self, id: UserId) -> Result<Role, DirectoryError> {
        let role: Option<String> =
            sqlx::query_scalar("SELECT role FROM telegram_users WHERE id = $1")
                .bind(id.0 as i64)
                .fetch_optional(&self.pool)
                .await?;

        role.map(|value| Role::from_db(&value))
            .ok_or(DirectoryError::UserNotFound(id))
    }
}
