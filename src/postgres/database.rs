//! PostgreSQL-backed user store
//!
//! Stores users in a single `users` table. Passwords are hashed with argon2
//! before they reach the database.

use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::types::StartupError;
use crate::user::error::UserError;
use crate::user::models::{NewUser, User, UserField, UserPatch};
use crate::user::repository::UserStore;
use crate::utils::password::security::PasswordService;

const COLUMNS: &str = "user_id, user_email, password, color, token";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    user_id BIGSERIAL PRIMARY KEY,
    user_email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    color TEXT,
    token TEXT NOT NULL DEFAULT ''
)";

/// Database connection pool wrapper
pub struct PgUserStore {
    pool: Pool,
}

impl PgUserStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
        }
    }

    /// Create the `users` table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), StartupError> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| StartupError::Database(format!("Failed to get database connection: {e}")))?;

        client
            .batch_execute(CREATE_TABLE)
            .await
            .map_err(|e| StartupError::Database(format!("Failed to create users table: {e}")))?;

        log::info!("users table ready");
        Ok(())
    }

    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<User>, UserError> {
        let client = self.pool.get().await?;
        let rows = client.query(sql, params).await?;
        rows.iter().map(row_to_user).collect()
    }

    /// Single-row statement; no row means the user does not exist
    async fn query_one_user(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<User, UserError> {
        self.query(sql, params).await?.into_iter().next().ok_or(UserError::UserNotFound)
    }
}

fn row_to_user(row: &Row) -> Result<User, UserError> {
    let token: Option<String> = row.try_get("token")?;

    Ok(User {
        user_id: row.try_get("user_id")?,
        user_email: row.try_get("user_email")?,
        password: row.try_get("password")?,
        color: row.try_get("color")?,
        token: token.unwrap_or_default(),
    })
}

/// Lookup by one column, compared as text so ids match their string form
fn find_sql(field: UserField) -> String {
    // The column name comes from a closed enum, never from the request.
    format!("SELECT {COLUMNS} FROM users WHERE {}::text = $1 ORDER BY user_id", field.column())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        self.query(&format!("SELECT {COLUMNS} FROM users ORDER BY user_id"), &[]).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Vec<User>, UserError> {
        let users =
            self.query(&format!("SELECT {COLUMNS} FROM users WHERE user_id = $1"), &[&id]).await?;

        if users.is_empty() {
            return Err(UserError::UserNotFound);
        }
        Ok(users)
    }

    async fn find(&self, field: UserField, value: &str) -> Result<Vec<User>, UserError> {
        self.query(&find_sql(field), &[&value]).await
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let password = PasswordService::hash_password_blocking(new_user.password).await?;

        self.query_one_user(
            &format!(
                "INSERT INTO users (user_email, password, token) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
            ),
            &[&new_user.user_email, &password, &new_user.token],
        )
        .await
    }

    async fn find_by_id_and_update(&self, id: i64, patch: UserPatch) -> Result<User, UserError> {
        let password = match patch.password {
            Some(plain) => Some(PasswordService::hash_password_blocking(plain).await?),
            None => None,
        };

        self.query_one_user(
            &format!(
                "UPDATE users SET password = COALESCE($2, password) WHERE user_id = $1 RETURNING {COLUMNS}"
            ),
            &[&id, &password],
        )
        .await
    }

    async fn find_by_id_and_delete(&self, id: i64) -> Result<User, UserError> {
        self.query_one_user(
            &format!("DELETE FROM users WHERE user_id = $1 RETURNING {COLUMNS}"),
            &[&id],
        )
        .await
    }
}
