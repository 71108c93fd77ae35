use crate::errors::ForecastError;

/// How many periods past the observed series the forecast point sits.
pub const DEFAULT_HORIZON: usize = 12;

/// Ordinary-least-squares line over an indexed series, plus the length of the
/// series it was fitted to. Recomputed from scratch on every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    observed: usize,
}

impl RegressionFit {
    /// Fits the line minimizing squared vertical distance to `points`.
    ///
    /// A single observation has zero variance in x, so the fit collapses to a
    /// flat line through that point instead of dividing by zero.
    pub fn fit(points: &[(usize, f64)]) -> Result<Self, ForecastError> {
        if points.is_empty() {
            return Err(ForecastError::InsufficientData);
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|&(x, _)| x as f64).sum::<f64>() / n;
        let y_mean = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for &(x, y) in points {
            let dx = x as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        let slope = if denominator == 0.0 { 0.0 } else { numerator / denominator };
        let intercept = y_mean - slope * x_mean;

        Ok(Self {
            slope,
            intercept,
            observed: points.len(),
        })
    }

    /// Value of the fitted line at `index`, observed or not.
    pub fn predict(&self, index: usize) -> (usize, f64) {
        (index, self.slope * index as f64 + self.intercept)
    }

    /// Fitted values at each observed index, aligned 1:1 with the input.
    pub fn points(&self) -> Vec<(usize, f64)> {
        (0..self.observed).map(|index| self.predict(index)).collect()
    }

    /// The single forecast point, `horizon` periods past the series length.
    pub fn forecast(&self, horizon: usize) -> (usize, f64) {
        self.predict(self.observed + horizon)
    }

    pub fn observed_len(&self) -> usize {
        self.observed
    }
}
