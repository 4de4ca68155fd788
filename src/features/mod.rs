pub mod items;
pub mod seeders;
pub mod users;
