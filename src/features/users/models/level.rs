use serde::Serialize;
use sqlx::FromRow;

/// Database model for `m_level`; read-only from the user module
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Level {
    pub level_id: i64,
    pub level_kode: String,
    pub level_nama: String,
}
