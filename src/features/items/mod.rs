//! Generic item catalogue with full CRUD.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/items` | List items |
//! | GET | `/items/create` | Creation form |
//! | POST | `/items` | Store a new item |
//! | GET | `/items/{id}` | Item detail |
//! | GET | `/items/{id}/edit` | Edit form |
//! | PUT/PATCH | `/items/{id}` | Update an item |
//! | DELETE | `/items/{id}` | Delete an item |
//! | POST | `/items/{id}` | Form-spoofed update/delete via `_method` |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgItemRepository;
pub use services::ItemService;
