use std::collections::HashMap;

use crate::analyzer::fields::split_fields;
use crate::model::{ConfigError, JobRecord, SampleRecord};

/// Keeps a zero bandwidth from dividing by zero.
const KERNEL_EPSILON: f64 = 1e-9;

pub const DEFAULT_SAMPLE_LIMIT: usize = 200;
pub const TOP_K_RANGE: std::ops::RangeInclusive<usize> = 3..=20;

/// Everything one hot-field run depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    /// Million VND per month.
    pub target_salary: f64,
    pub target_exp: f64,
    pub sigma_salary: f64,
    pub sigma_exp: f64,
    pub top_k: usize,
    pub sample_limit_per_field: usize,
}

impl ScoringParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("target_salary", self.target_salary)?;
        non_negative("target_exp", self.target_exp)?;
        positive("sigma_salary", self.sigma_salary)?;
        positive("sigma_exp", self.sigma_exp)?;
        if !TOP_K_RANGE.contains(&self.top_k) {
            return Err(ConfigError::InvalidParameter {
                name: "top_k",
                reason: format!(
                    "{} is outside {}..={}",
                    self.top_k,
                    TOP_K_RANGE.start(),
                    TOP_K_RANGE.end()
                ),
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{v} must be a finite number >= 0"),
        })
    }
}

fn positive(name: &'static str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{v} must be a finite number > 0"),
        })
    }
}

/// Running totals for one field token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAggregate {
    pub score: f64,
    pub count: u32,
    pub sum_salary: f64,
    /// First contributors only, up to the run's sample limit.
    pub samples: Vec<SampleRecord>,
}

/// Per-field aggregates in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FieldAccumulator {
    index: HashMap<String, usize>,
    fields: Vec<(String, FieldAggregate)>,
    sample_limit: usize,
}

impl FieldAccumulator {
    pub fn new(sample_limit: usize) -> Self {
        Self {
            index: HashMap::new(),
            fields: Vec::new(),
            sample_limit,
        }
    }

    fn add(&mut self, field: String, weight: f64, salary: f64, record: &JobRecord) {
        let slot = match self.index.get(&field) {
            Some(&i) => i,
            None => {
                self.fields.push((field.clone(), FieldAggregate::default()));
                self.index.insert(field, self.fields.len() - 1);
                self.fields.len() - 1
            }
        };
        let agg = &mut self.fields[slot].1;
        agg.score += weight;
        agg.count += 1;
        agg.sum_salary += salary;
        if agg.samples.len() < self.sample_limit {
            agg.samples.push(SampleRecord {
                job_title: record.job_title.clone(),
                city: record.city.clone(),
                position_level: record.position_level.clone(),
                salary_mid: salary,
                experience_years: record.experience_years,
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldAggregate> {
        self.index.get(field).map(|&i| &self.fields[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldAggregate)> {
        self.fields.iter().map(|(f, agg)| (f.as_str(), agg))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Gaussian closeness of `value` to `target`; `two_sigma2` is `2σ² + ε`.
fn kernel(value: f64, target: f64, two_sigma2: f64) -> f64 {
    let d = value - target;
    (-(d * d) / two_sigma2).exp()
}

pub fn gaussian_weight(value: f64, target: f64, sigma: f64) -> f64 {
    kernel(value, target, 2.0 * sigma * sigma + KERNEL_EPSILON)
}

/// Similarity of a posting to the target profile.
///
/// `None` when the posting has no salary or the weight underflows to zero.
/// A missing experience value is treated as a perfect match.
pub fn record_weight(record: &JobRecord, params: &ScoringParams) -> Option<f64> {
    let salary = record.salary_mid?;
    let w_sal = gaussian_weight(salary, params.target_salary, params.sigma_salary);
    let w_exp = record
        .experience_years
        .map_or(1.0, |e| gaussian_weight(e, params.target_exp, params.sigma_exp));
    let w = w_sal * w_exp;
    (w > 0.0).then_some(w)
}

/// Single pass over `records`, folding each weighted posting into its fields.
pub fn stream_recommend_fields<'a, I>(records: I, params: &ScoringParams) -> FieldAccumulator
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut acc = FieldAccumulator::new(params.sample_limit_per_field);
    for record in records {
        let (Some(salary), Some(weight)) = (record.salary_mid, record_weight(record, params)) else {
            continue;
        };
        for field in split_fields(Some(&record.job_fields)) {
            acc.add(field, weight, salary, record);
        }
    }
    acc
}
