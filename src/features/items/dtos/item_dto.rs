use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::items::models::{Item, ItemAttributes};

/// Submitted create/edit form.
///
/// Only `name` and `description` are declared, so any other submitted key
/// (`id`, timestamps, ...) is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ItemForm {
    #[serde(default)]
    #[validate(
        custom(function = "crate::shared::validation::not_blank"),
        length(max = 255, message = "Name must not exceed 255 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(
        custom(function = "crate::shared::validation::not_blank"),
        length(max = 5000, message = "Description must not exceed 5000 characters")
    )]
    pub description: String,
}

impl From<ItemForm> for ItemAttributes {
    fn from(form: ItemForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
        }
    }
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
        }
    }
}

/// `POST /items/{id}` body from an HTML form tunnelling PUT/PATCH/DELETE
#[derive(Debug, Clone, Deserialize)]
pub struct SpoofedItemForm {
    #[serde(rename = "_method", default)]
    pub method: String,

    #[serde(flatten)]
    pub fields: ItemForm,
}
