use async_trait::async_trait;
use sqlx::PgConnection;

use super::models::NewKategori;
use super::Seeder;
use crate::core::error::Result;

/// Fixed category fixture, also the pool [`super::BarangSeeder`] draws from.
///
/// The `eletronik` spelling is part of the fixture data.
pub const KATEGORI: [NewKategori; 5] = [
    NewKategori {
        kategori_kode: "eletronik",
        kategori_nama: "Elektronik",
    },
    NewKategori {
        kategori_kode: "pakaian",
        kategori_nama: "Pakaian",
    },
    NewKategori {
        kategori_kode: "aksesoris",
        kategori_nama: "Aksesoris",
    },
    NewKategori {
        kategori_kode: "buku",
        kategori_nama: "Buku",
    },
    NewKategori {
        kategori_kode: "alat_tulis",
        kategori_nama: "Alat Tulis",
    },
];

pub struct KategoriSeeder;

#[async_trait]
impl Seeder for KategoriSeeder {
    fn name(&self) -> &'static str {
        "KategoriSeeder"
    }

    async fn run(&self, conn: &mut PgConnection) -> Result<u64> {
        let mut inserted = 0;
        for kategori in &KATEGORI {
            inserted += sqlx::query(
                r#"
                INSERT INTO m_kategori (kategori_kode, kategori_nama)
                VALUES ($1, $2)
                ON CONFLICT (kategori_kode) DO NOTHING
                "#,
            )
            .bind(kategori.kategori_kode)
            .bind(kategori.kategori_nama)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_fit_column() {
        for kategori in &KATEGORI {
            assert!(kategori.kategori_kode.len() <= 10, "{}", kategori.kategori_kode);
        }
        assert_eq!(KATEGORI[0].kategori_kode, "eletronik");
    }
}
