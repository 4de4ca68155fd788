use rust_decimal::Decimal;

/// A row destined for `m_level`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLevel {
    pub level_kode: &'static str,
    pub level_nama: &'static str,
}

/// A row destined for `m_kategori`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKategori {
    pub kategori_kode: &'static str,
    pub kategori_nama: &'static str,
}

/// A generated `m_barang` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBarang {
    /// Resolved to `m_kategori.kategori_id` at insert time
    pub kategori_kode: &'static str,
    pub barang_kode: String,
    pub barang_nama: String,
    pub harga_beli: Decimal,
    pub harga_jual: Decimal,
}
