use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpiDoc {
    id: String,
    monthly_data: Vec<MonthlyDoc>,
}

#[derive(Debug, Deserialize)]
struct MonthlyDoc {
    month: String,
    revenue: Option<f64>,
    expenses: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartsResponse {
    revenue: Vec<NamedValue>,
    revenue_expenses: Vec<serde_json::Value>,
    revenue_profit: Vec<serde_json::Value>,
    predictions: Vec<PredictionRow>,
}

#[derive(Debug, Deserialize)]
struct NamedValue {
    name: String,
    revenue: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionRow {
    name: String,
    actual_revenue: Option<f64>,
    regression_line: Option<f64>,
    predicted_revenue: Option<f64>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("kpi_dashboard_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

fn seed_store(path: &str) {
    let documents = serde_json::json!([
        {
            "id": "kpi-1",
            "monthlyData": [
                { "month": "January", "revenue": 1000.0, "expenses": 800.0 },
                { "month": "February", "revenue": 1100.0, "expenses": 850.0 },
                { "month": "March", "revenue": 1200.0, "expenses": 900.0 }
            ]
        },
        {
            "id": "kpi-2",
            "monthlyData": []
        }
    ]);
    std::fs::write(path, serde_json::to_vec_pretty(&documents).unwrap()).expect("seed store");
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/kpi/kpis")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_kpi_dashboard"))
        .env("PORT", port.to_string())
        .env("KPI_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let data_path = unique_data_path();
    seed_store(&data_path);
    let server = Arc::new(spawn_server(&data_path).await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_kpis_returns_the_stored_documents() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let kpis: Vec<KpiDoc> = client
        .get(format!("{}/kpi/kpis", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[0].id, "kpi-1");
    assert_eq!(kpis[0].monthly_data.len(), 3);
    assert_eq!(kpis[0].monthly_data[0].month, "January");
    assert_eq!(kpis[0].monthly_data[0].revenue, Some(1000.0));
    assert_eq!(kpis[0].monthly_data[2].expenses, Some(900.0));
}

#[tokio::test]
async fn http_charts_assembles_every_dataset_from_the_first_document() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let charts: ChartsResponse = client
        .get(format!("{}/api/charts", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(charts.revenue.len(), 3);
    assert_eq!(charts.revenue[0].name, "Jan");
    assert_eq!(charts.revenue[0].revenue, 1000.0);
    assert_eq!(charts.revenue_expenses.len(), 3);
    assert_eq!(charts.revenue_profit.len(), 3);

    assert_eq!(charts.predictions.len(), 4);
    let history: Vec<&str> = charts.predictions[..3]
        .iter()
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(history, vec!["January", "February", "March"]);

    let forecast = charts.predictions.last().unwrap();
    assert_eq!(forecast.name, "Forecast");
    assert!(forecast.actual_revenue.is_none());
    assert!(forecast.regression_line.is_none());
    let predicted = forecast.predicted_revenue.expect("forecast value");
    assert!((predicted - 2500.0).abs() < 1e-6);
}

#[tokio::test]
async fn http_empty_store_degrades_to_empty_datasets() {
    let _guard = TEST_LOCK.lock().await;
    // A store path that does not exist on disk loads as an empty collection.
    let server = spawn_server(&unique_data_path()).await;
    let client = Client::new();

    let kpis: Vec<KpiDoc> = client
        .get(format!("{}/kpi/kpis", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(kpis.is_empty());

    let charts: ChartsResponse = client
        .get(format!("{}/api/charts", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(charts.revenue.is_empty());
    assert!(charts.revenue_expenses.is_empty());
    assert!(charts.revenue_profit.is_empty());
    assert!(charts.predictions.is_empty());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().contains("KPI Dashboard"));
}
