use serde::{Deserialize, Serialize};

/// One calendar month of financials as stored in a KPI document. Amounts are
/// optional because the store is schemaless; a missing amount is rejected at
/// extraction time rather than read as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub month: String,
    pub revenue: Option<f64>,
    pub expenses: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiEntity {
    pub id: String,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyRecord>,
}

/// One point of the predictions chart. Historical rows carry actual, fitted
/// and shifted-prediction values; the trailing forecast row carries only
/// `predicted_revenue`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression_line: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueExpensesPoint {
    pub name: String,
    pub revenue: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueProfitPoint {
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsResponse {
    pub revenue: Vec<RevenuePoint>,
    pub revenue_expenses: Vec<RevenueExpensesPoint>,
    pub revenue_profit: Vec<RevenueProfitPoint>,
    pub predictions: Vec<ChartRow>,
}
