use std::ops::RangeInclusive;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use super::kategori_seeder::KATEGORI;
use super::models::NewBarang;
use super::Seeder;
use crate::core::error::{AppError, Result};

pub const HARGA_BELI_RANGE: RangeInclusive<i64> = 10_000..=100_000;

/// Selling price is 150% of the purchase price
pub fn markup() -> Decimal {
    Decimal::new(15, 1)
}

/// Generate `count` inventory rows.
///
/// Row `i` (1-based) takes a random category from [`KATEGORI`] and refers
/// to it by code; the id is looked up when the row is inserted.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<NewBarang> {
    (1..=count)
        .map(|i| {
            let kategori = &KATEGORI[rng.gen_range(0..KATEGORI.len())];
            let harga_beli = Decimal::from(rng.gen_range(HARGA_BELI_RANGE));

            NewBarang {
                kategori_kode: kategori.kategori_kode,
                barang_kode: kategori.kategori_kode.to_string(),
                barang_nama: format!("{} Versi-{}", kategori.kategori_nama, i),
                harga_beli,
                harga_jual: harga_beli * markup(),
            }
        })
        .collect()
}

/// Inserts rows produced up front by [`generate`]
pub struct BarangSeeder {
    rows: Vec<NewBarang>,
}

impl BarangSeeder {
    pub fn new(rows: Vec<NewBarang>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl Seeder for BarangSeeder {
    fn name(&self) -> &'static str {
        "BarangSeeder"
    }

    async fn run(&self, conn: &mut PgConnection) -> Result<u64> {
        let mut inserted = 0;
        for barang in &self.rows {
            let written = sqlx::query(
                r#"
                INSERT INTO m_barang (kategori_id, barang_kode, barang_nama, harga_beli, harga_jual)
                SELECT kategori_id, $2, $3, $4, $5
                FROM m_kategori
                WHERE kategori_kode = $1
                "#,
            )
            .bind(barang.kategori_kode)
            .bind(&barang.barang_kode)
            .bind(&barang.barang_nama)
            .bind(barang.harga_beli)
            .bind(barang.harga_jual)
            .execute(&mut *conn)
            .await?
            .rows_affected();

            if written == 0 {
                return Err(AppError::ConstraintViolation(format!(
                    "Kategori '{}' does not exist",
                    barang.kategori_kode
                )));
            }
            inserted += written;
        }
        Ok(inserted)
    }
}
