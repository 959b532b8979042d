pub mod app;
pub mod config;
pub mod data;
pub mod db;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod utils;

pub use app::{AppState, build_app};
pub use config::Config;
pub use db::DbPool;
