// clean_jobs.csv parsing
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use tracing::{debug, info, warn};

use crate::model::{JobRecord, LoaderError};
use crate::utils::{parse_datetime, parse_number};

const DATE_HINTS: &[&str] = &["date", "posted", "time", "created"];

/// Parsed postings plus the name of the column dates were read from, if any.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<JobRecord>,
    pub date_column: Option<String>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub trait Parser {
    fn parse(&self, text: &str) -> Result<Dataset, LoaderError>;
}

pub struct CsvJobParser;

impl CsvJobParser {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &str) -> Result<Dataset, LoaderError> {
        let file = File::open(path).map_err(|source| LoaderError::Open {
            path: path.to_string(),
            source,
        })?;
        let dataset = self.parse_reader(file)?;
        info!("Loaded {} postings from {}", dataset.len(), path);
        Ok(dataset)
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Dataset, LoaderError> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let columns = Columns::resolve(&headers);

        if let Some(date_col) = &columns.date_name {
            debug!("Using '{}' as the posting date column", date_col);
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (idx, row) in rdr.records().enumerate() {
            match row {
                Ok(row) => records.push(columns.to_record(&row)),
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping malformed row {}: {}", idx + 2, e);
                }
            }
        }
        if skipped > 0 {
            warn!("Skipped {} malformed rows", skipped);
        }

        Ok(Dataset {
            records,
            date_column: columns.date_name,
        })
    }
}

impl Parser for CsvJobParser {
    fn parse(&self, text: &str) -> Result<Dataset, LoaderError> {
        self.parse_reader(text.as_bytes())
    }
}

/// Header positions of the columns we read; absent columns read as missing.
struct Columns {
    job_title: Option<usize>,
    city: Option<usize>,
    position_level: Option<usize>,
    job_fields: Option<usize>,
    salary_mid: Option<usize>,
    experience_years: Option<usize>,
    date: Option<usize>,
    date_name: Option<String>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let date = headers.iter().position(|h| {
            let lower = h.to_lowercase();
            DATE_HINTS.iter().any(|hint| lower.contains(hint))
        });
        Self {
            job_title: find("job_title"),
            city: find("city"),
            position_level: find("position_level"),
            job_fields: find("job_fields"),
            salary_mid: find("salary_mid"),
            experience_years: find("experience_years"),
            date,
            date_name: date.and_then(|i| headers.get(i)).map(str::to_string),
        }
    }

    fn text(row: &StringRecord, idx: Option<usize>) -> &str {
        idx.and_then(|i| row.get(i)).unwrap_or("").trim()
    }

    fn number(row: &StringRecord, idx: Option<usize>) -> Option<f64> {
        parse_number(Self::text(row, idx))
    }

    fn to_record(&self, row: &StringRecord) -> JobRecord {
        JobRecord::new(
            Self::text(row, self.job_title),
            Self::text(row, self.city),
            Self::text(row, self.position_level),
            Self::text(row, self.job_fields),
            Self::number(row, self.salary_mid),
            Self::number(row, self.experience_years),
        )
        .with_posted_at(parse_datetime(Self::text(row, self.date)))
    }
}
