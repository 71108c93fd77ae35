use crate::errors::ForecastError;
use crate::forecast::RegressionFit;
use crate::models::{
    ChartRow, ChartsResponse, KpiEntity, MonthlyRecord, RevenueExpensesPoint, RevenuePoint,
    RevenueProfitPoint,
};
use crate::series;

/// Label of the single appended forecast row. Distinct from every calendar
/// month so the renderer cannot mistake it for history.
pub const FORECAST_LABEL: &str = "Forecast";

/// Builds every chart dataset from the first KPI document. Additional
/// documents are served verbatim on /kpi/kpis but never charted.
pub fn build_charts(kpis: &[KpiEntity], horizon: usize) -> Result<ChartsResponse, ForecastError> {
    let records = kpis
        .first()
        .map(|entity| entity.monthly_data.as_slice())
        .unwrap_or(&[]);

    Ok(ChartsResponse {
        revenue: revenue_points(records)?,
        revenue_expenses: revenue_expenses_points(records)?,
        revenue_profit: revenue_profit_points(records)?,
        predictions: prediction_rows(records, horizon)?,
    })
}

/// Zips actual revenue with the fitted line, fills the shifted per-month
/// prediction, then appends the single forecast row. Historical rows keep the
/// input order; the forecast row is always last. An empty series yields no
/// rows at all rather than an error.
pub fn prediction_rows(
    records: &[MonthlyRecord],
    horizon: usize,
) -> Result<Vec<ChartRow>, ForecastError> {
    let revenue = series::revenue_series(records)?;
    let fit = match RegressionFit::fit(&revenue) {
        Ok(fit) => fit,
        Err(ForecastError::InsufficientData) => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let mut rows: Vec<ChartRow> = records
        .iter()
        .zip(revenue)
        .map(|(record, (index, actual))| ChartRow {
            name: record.month.clone(),
            actual_revenue: Some(actual),
            regression_line: Some(fit.predict(index).1),
            predicted_revenue: Some(fit.predict(index + horizon).1),
        })
        .collect();

    let (_, value) = fit.forecast(horizon);
    rows.push(ChartRow {
        name: FORECAST_LABEL.to_string(),
        actual_revenue: None,
        regression_line: None,
        predicted_revenue: Some(value),
    });

    Ok(rows)
}

fn revenue_points(records: &[MonthlyRecord]) -> Result<Vec<RevenuePoint>, ForecastError> {
    let revenue = series::revenue_series(records)?;
    Ok(records
        .iter()
        .zip(revenue)
        .map(|(record, (_, revenue))| RevenuePoint {
            name: short_label(&record.month),
            revenue,
        })
        .collect())
}

fn revenue_expenses_points(
    records: &[MonthlyRecord],
) -> Result<Vec<RevenueExpensesPoint>, ForecastError> {
    let revenue = series::revenue_series(records)?;
    let expenses = series::expenses_series(records)?;
    Ok(records
        .iter()
        .zip(revenue.into_iter().zip(expenses))
        .map(|(record, ((_, revenue), (_, expenses)))| RevenueExpensesPoint {
            name: short_label(&record.month),
            revenue,
            expenses,
        })
        .collect())
}

fn revenue_profit_points(
    records: &[MonthlyRecord],
) -> Result<Vec<RevenueProfitPoint>, ForecastError> {
    let revenue = series::revenue_series(records)?;
    let profit = series::profit_series(records)?;
    Ok(records
        .iter()
        .zip(revenue.into_iter().zip(profit))
        .map(|(record, ((_, revenue), (_, profit)))| RevenueProfitPoint {
            name: short_label(&record.month),
            revenue,
            profit,
        })
        .collect())
}

/// First three letters of the month name, the axis label format of the
/// non-forecast charts.
fn short_label(month: &str) -> String {
    month.get(..3).unwrap_or(month).to_string()
}
