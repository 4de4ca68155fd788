use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::classify;
use crate::core::error::Result;
use crate::features::users::models::{User, UserAttributes, UserWithLevel};

/// Persistence for `m_user`.
///
/// Writes surface an unknown `level_id` or a taken `username` as
/// `AppError::ConstraintViolation`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user with its level resolved in one query
    async fn all_with_level(&self) -> Result<Vec<UserWithLevel>>;
    async fn find(&self, user_id: i64) -> Result<Option<User>>;
    async fn insert(&self, attrs: &UserAttributes) -> Result<User>;
    async fn update(&self, user_id: i64, attrs: &UserAttributes) -> Result<Option<User>>;
    async fn delete(&self, user_id: i64) -> Result<bool>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn all_with_level(&self) -> Result<Vec<UserWithLevel>> {
        sqlx::query_as::<_, UserWithLevel>(
            r#"
            SELECT u.user_id, u.level_id, u.username, u.nama, l.level_kode, l.level_nama
            FROM m_user u
            JOIN m_level l ON l.level_id = u.level_id
            ORDER BY u.user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "user"))
    }

    async fn find(&self, user_id: i64) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, level_id, username, nama, password
            FROM m_user
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "user"))
    }

    async fn insert(&self, attrs: &UserAttributes) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO m_user (level_id, username, nama, password)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, level_id, username, nama, password
            "#,
        )
        .bind(attrs.level_id)
        .bind(&attrs.username)
        .bind(&attrs.nama)
        .bind(&attrs.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "user"))
    }

    async fn update(&self, user_id: i64, attrs: &UserAttributes) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE m_user
            SET level_id = $2, username = $3, nama = $4, password = $5, updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, level_id, username, nama, password
            "#,
        )
        .bind(user_id)
        .bind(attrs.level_id)
        .bind(&attrs.username)
        .bind(&attrs.nama)
        .bind(&attrs.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "user"))
    }

    async fn delete(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM m_user WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, "user"))?;
        Ok(result.rows_affected() > 0)
    }
}
