use async_trait::async_trait;
use sqlx::PgConnection;

use super::models::NewLevel;
use super::Seeder;
use crate::core::error::Result;

pub const LEVELS: [NewLevel; 3] = [
    NewLevel {
        level_kode: "ADM",
        level_nama: "Administrator",
    },
    NewLevel {
        level_kode: "MNG",
        level_nama: "Manager",
    },
    NewLevel {
        level_kode: "STF",
        level_nama: "Staff/Kasir",
    },
];

/// Inserts the user levels the user module references
pub struct LevelSeeder;

#[async_trait]
impl Seeder for LevelSeeder {
    fn name(&self) -> &'static str {
        "LevelSeeder"
    }

    async fn run(&self, conn: &mut PgConnection) -> Result<u64> {
        let mut inserted = 0;
        for level in &LEVELS {
            inserted += sqlx::query(
                r#"
                INSERT INTO m_level (level_kode, level_nama)
                VALUES ($1, $2)
                ON CONFLICT (level_kode) DO NOTHING
                "#,
            )
            .bind(level.level_kode)
            .bind(level.level_nama)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(inserted)
    }
}
