//! Configuration handling, from the persisted model to the runtime model.

mod models;

pub mod rt;
pub mod types;

pub use models::*;
