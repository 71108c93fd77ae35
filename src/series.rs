use crate::errors::ForecastError;
use crate::models::MonthlyRecord;

/// Pairs each record's revenue with its zero-based position in the series.
pub fn revenue_series(records: &[MonthlyRecord]) -> Result<Vec<(usize, f64)>, ForecastError> {
    indexed(records, "revenue", |record| record.revenue)
}

pub fn expenses_series(records: &[MonthlyRecord]) -> Result<Vec<(usize, f64)>, ForecastError> {
    indexed(records, "expenses", |record| record.expenses)
}

/// Profit is revenue minus expenses, month by month.
pub fn profit_series(records: &[MonthlyRecord]) -> Result<Vec<(usize, f64)>, ForecastError> {
    let revenue = revenue_series(records)?;
    let expenses = expenses_series(records)?;
    Ok(revenue
        .into_iter()
        .zip(expenses)
        .map(|((index, revenue), (_, expenses))| (index, revenue - expenses))
        .collect())
}

fn indexed(
    records: &[MonthlyRecord],
    field: &'static str,
    amount: impl Fn(&MonthlyRecord) -> Option<f64>,
) -> Result<Vec<(usize, f64)>, ForecastError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let value = amount(record).filter(|value| value.is_finite()).ok_or_else(|| {
                ForecastError::MalformedRecord {
                    month: record.month.clone(),
                    field,
                }
            })?;
            Ok((index, value))
        })
        .collect()
}
