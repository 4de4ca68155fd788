use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, EntityId};
use crate::features::items::dtos::{ItemForm, SpoofedItemForm};
use crate::features::items::models::Item;
use crate::features::items::services::ItemService;
use crate::shared::flash::{redirect_with_flash, Flash, FlashMessage};
use crate::shared::validation::{field_messages, FormErrors};
use crate::shared::views;

const INDEX_PATH: &str = "/items";

/// List all items
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
    flash: Flash,
) -> Result<Response> {
    let items = service.list().await?;
    let html = views::render(
        "items/index.html",
        context! { items => items, flash => flash.message() },
    )?;
    Ok(flash.respond(html))
}

/// Empty creation form
pub async fn new_item_form() -> Result<Html<String>> {
    let html = create_page(&ItemForm::default(), &FormErrors::new())?;
    Ok(Html(html))
}

/// Store a new item from the allow-listed form fields
pub async fn create_item(
    State(service): State<Arc<ItemService>>,
    AppForm(form): AppForm<ItemForm>,
) -> Result<Response> {
    if let Err(e) = form.validate() {
        let html = create_page(&form, &field_messages(&e))?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    service.create(form.into()).await?;
    Ok(redirect_with_flash(
        INDEX_PATH,
        FlashMessage::success("Item added successfully."),
    ))
}

/// Item detail
pub async fn show_item(
    State(service): State<Arc<ItemService>>,
    EntityId(id): EntityId,
) -> Result<Html<String>> {
    let item = service.find(id).await?;
    let html = views::render("items/show.html", context! { item => item })?;
    Ok(Html(html))
}

/// Edit form pre-filled with the stored values
pub async fn edit_item_form(
    State(service): State<Arc<ItemService>>,
    EntityId(id): EntityId,
) -> Result<Html<String>> {
    let item = service.find(id).await?;
    let html = edit_page(&item, &ItemForm::from(&item), &FormErrors::new())?;
    Ok(Html(html))
}

/// `PUT`/`PATCH /items/{id}`
pub async fn update_item(
    State(service): State<Arc<ItemService>>,
    EntityId(id): EntityId,
    AppForm(form): AppForm<ItemForm>,
) -> Result<Response> {
    apply_update(&service, id, form).await
}

/// `DELETE /items/{id}`
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    EntityId(id): EntityId,
) -> Result<Response> {
    apply_delete(&service, id).await
}

/// `POST /items/{id}` with `_method` selecting the real verb
pub async fn spoofed_item_write(
    State(service): State<Arc<ItemService>>,
    EntityId(id): EntityId,
    AppForm(form): AppForm<SpoofedItemForm>,
) -> Result<Response> {
    match form.method.trim().to_ascii_uppercase().as_str() {
        "PUT" | "PATCH" => apply_update(&service, id, form.fields).await,
        "DELETE" => apply_delete(&service, id).await,
        other => Err(AppError::MethodNotAllowed(format!(
            "POST /items/{} does not accept _method '{}'",
            id, other
        ))),
    }
}

async fn apply_update(service: &ItemService, id: i64, form: ItemForm) -> Result<Response> {
    let item = service.find(id).await?;

    if let Err(e) = form.validate() {
        let html = edit_page(&item, &form, &field_messages(&e))?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    service.update(item.id, form.into()).await?;
    Ok(redirect_with_flash(
        INDEX_PATH,
        FlashMessage::success("Item updated successfully."),
    ))
}

async fn apply_delete(service: &ItemService, id: i64) -> Result<Response> {
    service.delete(id).await?;
    Ok(redirect_with_flash(
        INDEX_PATH,
        FlashMessage::success("Item deleted successfully."),
    ))
}

fn create_page(form: &ItemForm, errors: &FormErrors) -> Result<String> {
    Ok(views::render(
        "items/create.html",
        context! { form => form, errors => errors },
    )?)
}

fn edit_page(item: &Item, form: &ItemForm, errors: &FormErrors) -> Result<String> {
    Ok(views::render(
        "items/edit.html",
        context! { item => item, form => form, errors => errors },
    )?)
}
