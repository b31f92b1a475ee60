pub mod app;
pub mod calendar;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod session;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::{load_tracker, resolve_data_dir};
