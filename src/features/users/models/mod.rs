mod level;
mod user;

pub use level::Level;
pub use user::{User, UserAttributes, UserWithLevel};
