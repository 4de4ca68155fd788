//! Server-rendered HTML views.
//!
//! Every page extends `layout.html`; list pages receive the pending flash
//! message under the `flash` key.

pub mod engine;

pub use engine::{init_views, render, ViewError};
