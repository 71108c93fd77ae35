pub mod app;
pub mod charts;
pub mod errors;
pub mod forecast;
pub mod handlers;
pub mod models;
pub mod series;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use forecast::DEFAULT_HORIZON;
pub use state::AppState;
pub use storage::{load_kpis, resolve_data_path};
