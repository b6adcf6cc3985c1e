pub mod config;
pub mod core;
pub mod fetch;
pub mod update;
