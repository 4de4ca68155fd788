use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppForm, EntityId};
use crate::features::users::dtos::UserForm;
use crate::features::users::models::User;
use crate::features::users::services::UserService;
use crate::shared::flash::{redirect_with_flash, Flash, FlashMessage};
use crate::shared::validation::{field_messages, FormErrors};
use crate::shared::views;

const INDEX_PATH: &str = "/user";

/// Users with their level
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    flash: Flash,
) -> Result<Response> {
    let users = service.list().await?;
    let html = views::render(
        "user/index.html",
        context! { data => users, flash => flash.message() },
    )?;
    Ok(flash.respond(html))
}

pub async fn tambah(State(service): State<Arc<UserService>>) -> Result<Html<String>> {
    let html = tambah_page(&service, &UserForm::default(), &FormErrors::new()).await?;
    Ok(Html(html))
}

pub async fn tambah_simpan(
    State(service): State<Arc<UserService>>,
    AppForm(form): AppForm<UserForm>,
) -> Result<Response> {
    if let Err(e) = form.validate() {
        let html = tambah_page(&service, &form, &field_messages(&e)).await?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    service.create(form.into_input()?).await?;
    Ok(redirect_with_flash(
        INDEX_PATH,
        FlashMessage::success("User berhasil ditambahkan."),
    ))
}

pub async fn ubah(
    State(service): State<Arc<UserService>>,
    EntityId(id): EntityId,
) -> Result<Html<String>> {
    let user = service.find(id).await?;
    let html = ubah_page(&service, &user, &UserForm::from(&user), &FormErrors::new()).await?;
    Ok(Html(html))
}

pub async fn ubah_simpan(
    State(service): State<Arc<UserService>>,
    EntityId(id): EntityId,
    AppForm(form): AppForm<UserForm>,
) -> Result<Response> {
    let user = service.find(id).await?;

    if let Err(e) = form.validate() {
        let html = ubah_page(&service, &user, &form, &field_messages(&e)).await?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    service.update(user.user_id, form.into_input()?).await?;
    Ok(redirect_with_flash(
        INDEX_PATH,
        FlashMessage::success("User berhasil diubah."),
    ))
}

pub async fn hapus(
    State(service): State<Arc<UserService>>,
    EntityId(id): EntityId,
) -> Result<Response> {
    service.delete(id).await?;
    Ok(redirect_with_flash(
        INDEX_PATH,
        FlashMessage::success("User berhasil dihapus."),
    ))
}

async fn tambah_page(service: &UserService, form: &UserForm, errors: &FormErrors) -> Result<String> {
    let levels = service.levels().await?;
    Ok(views::render(
        "user/tambah.html",
        context! { form => form, errors => errors, levels => levels },
    )?)
}

async fn ubah_page(
    service: &UserService,
    user: &User,
    form: &UserForm,
    errors: &FormErrors,
) -> Result<String> {
    let levels = service.levels().await?;
    Ok(views::render(
        "user/ubah.html",
        context! { data => user, form => form, errors => errors, levels => levels },
    )?)
}
