use crate::charts::build_charts;
use crate::errors::AppError;
use crate::models::{ChartsResponse, KpiEntity};
use crate::state::AppState;
use crate::ui::render_dashboard;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let records = state
        .kpis
        .first()
        .map(|entity| entity.monthly_data.as_slice())
        .unwrap_or(&[]);
    Html(render_dashboard(records.len(), records.last()))
}

pub async fn get_kpis(State(state): State<AppState>) -> Json<Vec<KpiEntity>> {
    Json(state.kpis.as_ref().clone())
}

pub async fn get_charts(State(state): State<AppState>) -> Result<Json<ChartsResponse>, AppError> {
    let charts = build_charts(&state.kpis, state.horizon)?;
    Ok(Json(charts))
}
