use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the forecasting pipeline. The core performs no I/O, so these
/// are the only ways a computation can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("no monthly data to fit a regression against")]
    InsufficientData,
    #[error("monthly record for {month} has no usable {field} value")]
    MalformedRecord { month: String, field: &'static str },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        Self::unprocessable(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
