mod item;

pub use item::{Item, ItemAttributes};
