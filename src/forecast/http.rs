use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::forecast::traits::Forecaster;
use crate::model::{DailyCount, ForecastError, ForecastPoint};

#[derive(Debug, Serialize)]
struct ForecastRequest<'a> {
    history: &'a [DailyCount],
    periods: u32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: Vec<ForecastPoint>,
}

/// Talks to a forecasting service over JSON/HTTP.
pub struct HttpForecaster {
    client: Client,
    endpoint: String,
}

impl HttpForecaster {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .user_agent(concat!("vn-jobs-insight/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ForecastError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl Forecaster for HttpForecaster {
    async fn forecast(
        &self,
        history: &[DailyCount],
        periods: u32,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        info!(
            "Requesting {}-day forecast from {} ({} history days)",
            periods,
            self.endpoint,
            history.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ForecastRequest { history, periods })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ForecastError::Timeout
                } else {
                    ForecastError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("Forecast service responded [{}]: {}", status, body);
            return Err(ForecastError::InvalidResponse(format!("status {status}")));
        }

        let parsed: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::InvalidResponse(e.to_string()))?;
        Ok(parsed.forecast)
    }
}
