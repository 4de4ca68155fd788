use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::items::models::{Item, ItemAttributes};
use crate::features::items::repositories::ItemRepository;

/// Service for item operations
pub struct ItemService {
    repo: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Item>> {
        self.repo.all().await
    }

    /// Lookup-or-fail used by every `{id}` route
    pub async fn find(&self, id: i64) -> Result<Item> {
        self.repo.find(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, attrs: ItemAttributes) -> Result<Item> {
        let item = self.repo.insert(&attrs).await?;
        tracing::info!("Item created: id={}, name={:?}", item.id, item.name);
        Ok(item)
    }

    pub async fn update(&self, id: i64, attrs: ItemAttributes) -> Result<Item> {
        let item = self
            .repo
            .update(id, &attrs)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Item updated: id={}", item.id);
        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Item deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Item {} not found", id))
}
