use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::classify;
use crate::core::error::Result;
use crate::features::items::models::{Item, ItemAttributes};

/// Persistence for the `item` table; every call is one SQL statement
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<Item>>;
    async fn find(&self, id: i64) -> Result<Option<Item>>;
    async fn insert(&self, attrs: &ItemAttributes) -> Result<Item>;
    /// `None` when no row has `id`
    async fn update(&self, id: i64, attrs: &ItemAttributes) -> Result<Option<Item>>;
    /// `false` when no row has `id`
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn all(&self) -> Result<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM item
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "item"))
    }

    async fn find(&self, id: i64) -> Result<Option<Item>> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM item
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "item"))
    }

    async fn insert(&self, attrs: &ItemAttributes) -> Result<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO item (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&attrs.name)
        .bind(&attrs.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "item"))
    }

    async fn update(&self, id: i64, attrs: &ItemAttributes) -> Result<Option<Item>> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE item
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&attrs.name)
        .bind(&attrs.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "item"))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM item WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, "item"))?;
        Ok(result.rows_affected() > 0)
    }
}
