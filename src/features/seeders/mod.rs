//! Fixture data for the point-of-sale tables, run with `toko-admin seed`.
//!
//! Each seeder runs in its own transaction. Levels and categories are
//! idempotent (`ON CONFLICT DO NOTHING`); inventory rows are appended on
//! every run.

pub mod barang_seeder;
pub mod kategori_seeder;
pub mod level_seeder;
pub mod models;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::{PgConnection, PgPool};

use crate::core::config::SeederConfig;
use crate::core::error::Result;

pub use barang_seeder::BarangSeeder;
pub use kategori_seeder::KategoriSeeder;
pub use level_seeder::LevelSeeder;

#[async_trait]
pub trait Seeder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Insert this seeder's rows, returning how many were written
    async fn run(&self, conn: &mut PgConnection) -> Result<u64>;
}

/// RNG for fixture generation: reproducible when a seed is configured
pub fn fixture_rng(config: &SeederConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Seeders in dependency order
pub fn all_seeders(config: &SeederConfig) -> Vec<Box<dyn Seeder>> {
    let rows = barang_seeder::generate(&mut fixture_rng(config), config.barang_count);

    vec![
        Box::new(LevelSeeder),
        Box::new(KategoriSeeder),
        Box::new(BarangSeeder::new(rows)),
    ]
}

/// Run every seeder, each inside one transaction
pub async fn run_all(pool: &PgPool, config: &SeederConfig) -> Result<u64> {
    let mut total = 0;

    for seeder in all_seeders(config) {
        let mut tx = pool.begin().await?;
        let inserted = seeder.run(&mut *tx).await.inspect_err(|e| {
            tracing::error!("{} failed, rolling back: {}", seeder.name(), e);
        })?;
        tx.commit().await?;

        tracing::info!("{} inserted {} rows", seeder.name(), inserted);
        total += inserted;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use rust_decimal::Decimal;

    #[test]
    fn test_seeders_run_in_dependency_order() {
        let config = SeederConfig {
            rng_seed: Some(5),
            ..Default::default()
        };
        let names: Vec<_> = all_seeders(&config).iter().map(|s| s.name()).collect();
        assert_eq!(names, ["LevelSeeder", "KategoriSeeder", "BarangSeeder"]);
    }

    #[test]
    fn test_configured_seed_is_reproducible() {
        let config = SeederConfig {
            rng_seed: Some(99),
            ..Default::default()
        };
        let a = barang_seeder::generate(&mut fixture_rng(&config), 10);
        let b = barang_seeder::generate(&mut fixture_rng(&config), 10);
        assert_eq!(a, b);
    }

    async fn stored_barang(pool: &PgPool) -> Vec<(String, String, String, Decimal, Decimal)> {
        sqlx::query_as(
            r#"
            SELECT b.barang_nama, b.barang_kode, k.kategori_kode, b.harga_beli, b.harga_jual
            FROM m_barang b
            JOIN m_kategori k ON k.kategori_id = b.kategori_id
            ORDER BY b.barang_id
            "#,
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn seeded(seed: u64) -> SeederConfig {
        SeederConfig {
            rng_seed: Some(seed),
            ..Default::default()
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_run_all_stores_exact_markup(pool: PgPool) {
        let total = run_all(&pool, &seeded(1)).await.unwrap();
        assert_eq!(total, 3 + 5 + 10);

        let rows = stored_barang(&pool).await;
        assert_eq!(rows.len(), 10);
        for (nama, barang_kode, kategori_kode, harga_beli, harga_jual) in rows {
            assert_eq!(barang_kode, kategori_kode, "{} linked to the wrong kategori", nama);
            assert_eq!(harga_jual * Decimal::TWO, harga_beli * Decimal::from(3));
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_barang_follow_kategori_when_ids_are_shifted(pool: PgPool) {
        sqlx::query("INSERT INTO m_kategori (kategori_kode, kategori_nama) VALUES ('misc', 'Lain-lain')")
            .execute(&pool)
            .await
            .unwrap();

        run_all(&pool, &seeded(1)).await.unwrap();

        let rows = stored_barang(&pool).await;
        assert_eq!(rows.len(), 10);
        for (nama, barang_kode, kategori_kode, _, _) in rows {
            assert_eq!(barang_kode, kategori_kode, "{} linked to the wrong kategori", nama);
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_rerun_only_appends_barang(pool: PgPool) {
        run_all(&pool, &seeded(2)).await.unwrap();
        let second = run_all(&pool, &seeded(2)).await.unwrap();

        assert_eq!(second, 10);
        assert_eq!(count(&pool, "m_level").await, 3);
        assert_eq!(count(&pool, "m_kategori").await, 5);
        assert_eq!(count(&pool, "m_barang").await, 20);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_barang_without_kategori_is_rejected(pool: PgPool) {
        let rows = barang_seeder::generate(&mut StdRng::seed_from_u64(4), 1);
        let mut conn = pool.acquire().await.unwrap();

        let result = BarangSeeder::new(rows).run(&mut conn).await;
        assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
        drop(conn);
        assert_eq!(count(&pool, "m_barang").await, 0);
    }
}
