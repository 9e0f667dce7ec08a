use crate::model::{DailyCount, ForecastError, ForecastPoint};

/// Black-box time-series model: daily history in, `periods` predicted days out.
#[async_trait::async_trait]
pub trait Forecaster: Send + Sync {
    async fn forecast(
        &self,
        history: &[DailyCount],
        periods: u32,
    ) -> Result<Vec<ForecastPoint>, ForecastError>;
}
