use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::classify;
use crate::core::error::Result;
use crate::features::users::models::Level;

#[async_trait]
pub trait LevelRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<Level>>;
    async fn find(&self, level_id: i64) -> Result<Option<Level>>;
}

pub struct PgLevelRepository {
    pool: PgPool,
}

impl PgLevelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LevelRepository for PgLevelRepository {
    async fn all(&self) -> Result<Vec<Level>> {
        sqlx::query_as::<_, Level>(
            r#"
            SELECT level_id, level_kode, level_nama
            FROM m_level
            ORDER BY level_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "level"))
    }

    async fn find(&self, level_id: i64) -> Result<Option<Level>> {
        sqlx::query_as::<_, Level>(
            r#"
            SELECT level_id, level_kode, level_nama
            FROM m_level
            WHERE level_id = $1
            "#,
        )
        .bind(level_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "level"))
    }
}
