pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod infra;

pub use api::{router, AppState};
pub use config::Config;
