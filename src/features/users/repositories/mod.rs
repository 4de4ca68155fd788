mod level_repository;
mod user_repository;

pub use level_repository::{LevelRepository, PgLevelRepository};
pub use user_repository::{PgUserRepository, UserRepository};
