use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the user management feature
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/user", get(handlers::list_users))
        .route(
            "/user/tambah",
            get(handlers::tambah).post(handlers::tambah_simpan),
        )
        .route(
            "/user/{id}/ubah",
            get(handlers::ubah).post(handlers::ubah_simpan),
        )
        .route(
            "/user/{id}/hapus",
            get(handlers::hapus).post(handlers::hapus),
        )
        .with_state(service)
}
