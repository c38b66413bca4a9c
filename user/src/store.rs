//! Access to the `users` table.

use chrono::{DateTime, Utc};
use entities::{Role, User};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{Result, UserError};

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, first_name, last_name, role, created_at, updated_at
    FROM users
"#;

/// Fields needed to insert a user; id and timestamps are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        fetch_by_id(&self.pool, id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Looking up user by email");
        let user = sqlx::query_as::<_, User>(&format!("{} WHERE email = ?", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Insert a user. A concurrent registration of the same email surfaces
    /// as [`UserError::EmailTaken`] through the UNIQUE constraint.
    pub async fn insert(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if database::is_unique_violation(&e) {
                UserError::EmailTaken(new_user.email.clone())
            } else {
                UserError::Database(e)
            }
        })?;

        let id = result.last_insert_rowid();
        debug!("Inserted user {}", id);

        Ok(User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!("{} ORDER BY id", SELECT_USER))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_role(&self, role: Role) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = ?")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Load a user through any executor, so lookups can share a transaction.
pub async fn fetch_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} WHERE id = ?", SELECT_USER);
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

pub async fn update_role<'e, E>(
    executor: E,
    id: i64,
    role: Role,
    updated_at: DateTime<Utc>,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
        .bind(role.as_str())
        .bind(updated_at)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Delete a user. Rejected with [`UserError::UserOwnsJobs`] while any job
/// still references them.
pub async fn delete<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            if database::is_foreign_key_violation(&e) {
                UserError::UserOwnsJobs(id)
            } else {
                UserError::Database(e)
            }
        })?;
    Ok(())
}
