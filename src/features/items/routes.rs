use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::items::handlers;
use crate::features::items::services::ItemService;

/// Create routes for the items feature
pub fn routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/items/create", get(handlers::new_item_form))
        .route(
            "/items/{id}",
            get(handlers::show_item)
                .put(handlers::update_item)
                .patch(handlers::update_item)
                .delete(handlers::delete_item)
                .post(handlers::spoofed_item_write),
        )
        .route("/items/{id}/edit", get(handlers::edit_item_form))
        .with_state(service)
}
