use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/kpi/kpis", get(handlers::get_kpis))
        .route("/api/charts", get(handlers::get_charts))
        .with_state(state)
}
