use crate::models::KpiEntity;
use std::sync::Arc;

/// Shared handle over the loaded KPI documents and the forecast horizon.
/// The store is read-only for the life of the process, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub kpis: Arc<Vec<KpiEntity>>,
    pub horizon: usize,
}

impl AppState {
    pub fn new(kpis: Vec<KpiEntity>, horizon: usize) -> Self {
        Self {
            kpis: Arc::new(kpis),
            horizon,
        }
    }
}
