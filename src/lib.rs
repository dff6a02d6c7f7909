pub mod app;
pub mod config;
pub mod drafts;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_document, resolve_data_path};
pub use store::LogStore;
