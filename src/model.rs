// Core structs: JobRecord, SampleRecord, DailyCount, ForecastPoint
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalizer::{norm_level, norm_text};

/// One row of the postings dataset.
///
/// The `*_norm` fields are match keys derived once at construction so the
/// record filter never re-normalizes text.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub job_title: String,
    pub city: String,
    pub position_level: String,
    pub job_fields: String,
    /// Monthly salary midpoint, million VND.
    pub salary_mid: Option<f64>,
    pub experience_years: Option<f64>,
    pub posted_at: Option<NaiveDateTime>,
    pub city_norm: String,
    pub level_norm: String,
    pub fields_norm: String,
}

impl JobRecord {
    pub fn new(
        job_title: impl Into<String>,
        city: impl Into<String>,
        position_level: impl Into<String>,
        job_fields: impl Into<String>,
        salary_mid: Option<f64>,
        experience_years: Option<f64>,
    ) -> Self {
        let city = city.into();
        let position_level = position_level.into();
        let job_fields = job_fields.into();
        Self {
            city_norm: norm_text(&city),
            level_norm: norm_level(&position_level),
            fields_norm: norm_text(&job_fields),
            job_title: job_title.into(),
            city,
            position_level,
            job_fields,
            salary_mid,
            experience_years,
            posted_at: None,
        }
    }

    pub fn with_posted_at(mut self, posted_at: Option<NaiveDateTime>) -> Self {
        self.posted_at = posted_at;
        self
    }
}

/// Projection of a [`JobRecord`] kept as supporting evidence for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub job_title: String,
    pub city: String,
    pub position_level: String,
    pub salary_mid: f64,
    pub experience_years: Option<f64>,
}

/// Postings seen on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub ds: NaiveDate,
    pub y: u32,
}

/// One predicted day returned by the forecasting service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("forecast service timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("no forecast endpoint configured")]
    NotConfigured,
}
