use serde::Serialize;
use sqlx::FromRow;

/// Database model for `m_user`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub level_id: i64,
    pub username: String,
    pub nama: String,
    /// Argon2 PHC digest, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
}

/// `m_user` row joined with the level it belongs to
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWithLevel {
    pub user_id: i64,
    pub level_id: i64,
    pub username: String,
    pub nama: String,
    pub level_kode: String,
    pub level_nama: String,
}

/// The columns a create or update may write; `user_id` is store-assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttributes {
    pub level_id: i64,
    pub username: String,
    pub nama: String,
    pub password_hash: String,
}
