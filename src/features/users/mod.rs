//! Point-of-sale user management (`m_user`), each user belonging to a `m_level`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/user` | List users with their level |
//! | GET | `/user/tambah` | Creation form |
//! | POST | `/user/tambah` | Store a new user |
//! | GET | `/user/{id}/ubah` | Edit form |
//! | POST | `/user/{id}/ubah` | Update a user |
//! | GET/POST | `/user/{id}/hapus` | Delete a user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgLevelRepository, PgUserRepository};
pub use services::UserService;
