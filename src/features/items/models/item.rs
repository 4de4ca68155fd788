use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database model for the `item` table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The only columns a create or update may write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAttributes {
    pub name: String,
    pub description: String,
}
