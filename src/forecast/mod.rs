// Posting-volume forecasting: builds the daily series and delegates to a Forecaster.

pub mod http;
pub mod traits;

pub use http::HttpForecaster;
pub use traits::Forecaster;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::model::{DailyCount, ForecastPoint, JobRecord};

/// Rows of the forecast shown in the report.
pub const TAIL_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    NoDateColumn,
    NoValidDates,
    Disabled,
    Failed { reason: String },
    Ready {
        history: Vec<DailyCount>,
        forecast: Vec<ForecastPoint>,
    },
}

/// Number of postings per calendar day, oldest first. Days with no postings are absent.
pub fn daily_series<'a, I>(records: I) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut days: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for posted in records.into_iter().filter_map(|r| r.posted_at) {
        *days.entry(posted.date()).or_default() += 1;
    }
    days.into_iter().map(|(ds, y)| DailyCount { ds, y }).collect()
}

/// Runs one forecast over `records`; every failure mode becomes an outcome, not an error.
pub async fn run_forecast(
    forecaster: Option<&dyn Forecaster>,
    records: &[&JobRecord],
    date_column: Option<&str>,
    periods: u32,
) -> ForecastOutcome {
    let Some(column) = date_column else {
        return ForecastOutcome::NoDateColumn;
    };

    let history = daily_series(records.iter().copied());
    if history.is_empty() {
        return ForecastOutcome::NoValidDates;
    }
    info!("Built {} daily points from column '{}'", history.len(), column);

    let Some(forecaster) = forecaster else {
        return ForecastOutcome::Disabled;
    };

    match forecaster.forecast(&history, periods).await {
        Ok(forecast) => ForecastOutcome::Ready { history, forecast },
        Err(e) => {
            warn!("Forecast failed: {}", e);
            ForecastOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
