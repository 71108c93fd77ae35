use crate::models::KpiEntity;
use chrono::Month;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("KPI_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/kpis.json"))
}

/// Reads the KPI document collection. A missing or unreadable store yields an
/// empty collection so the dashboard degrades instead of refusing to start.
pub async fn load_kpis(path: &Path) -> Vec<KpiEntity> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<KpiEntity>>(&bytes) {
            Ok(kpis) => {
                check_month_labels(&kpis);
                kpis
            }
            Err(err) => {
                error!("failed to parse KPI data file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read KPI data file: {err}");
            Vec::new()
        }
    }
}

// Monthly data is expected in calendar order with recognized month names;
// producers own that invariant, so violations are only warned about.
fn check_month_labels(kpis: &[KpiEntity]) {
    for entity in kpis {
        let mut last = 0;
        for record in &entity.monthly_data {
            match record.month.parse::<Month>() {
                Ok(month) => {
                    let number = month.number_from_month();
                    if number <= last {
                        warn!(
                            "KPI {}: monthly data out of calendar order at {}",
                            entity.id, record.month
                        );
                    }
                    last = number;
                }
                Err(_) => warn!(
                    "KPI {}: unrecognized month label {:?}",
                    entity.id, record.month
                ),
            }
        }
    }
}
