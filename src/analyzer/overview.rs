use serde::Serialize;
use std::collections::HashMap;

use crate::analyzer::hot_fields::ScoringParams;
use crate::analyzer::stats::{mean, median, min_max};
use crate::config::HotFieldsConfig;
use crate::model::JobRecord;

pub const TOP_CITIES: usize = 15;
pub const SUGGESTIONS: usize = 30;

/// Salary distribution of the filtered postings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalarySummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total: usize,
    pub filtered: usize,
    pub top_cities: Vec<(String, usize)>,
    pub salary: Option<SalarySummary>,
    pub city_suggestions: Vec<(String, usize)>,
    pub level_suggestions: Vec<(String, usize)>,
}

/// Counts values, most frequent first; ties keep first-seen order.
///
/// Blank and `nan` placeholders are not values and are never counted.
pub fn value_counts<'a, I>(values: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        let v = v.trim();
        if v.is_empty() || v.eq_ignore_ascii_case("nan") {
            continue;
        }
        let slot = counts.entry(v.to_string()).or_insert(0);
        if *slot == 0 {
            order.push(v.to_string());
        }
        *slot += 1;
    }
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|v| {
            let n = counts[&v];
            (v, n)
        })
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out.truncate(limit);
    out
}

pub fn salary_summary<'a, I>(records: I) -> Option<SalarySummary>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let salaries: Vec<f64> = records.into_iter().filter_map(|r| r.salary_mid).collect();
    let (min, max) = min_max(&salaries)?;
    Some(SalarySummary {
        count: salaries.len(),
        min,
        max,
        mean: mean(&salaries)?,
        median: median(&salaries)?,
    })
}

pub fn build_overview(all: &[JobRecord], filtered: &[&JobRecord]) -> Overview {
    let lowered_cities: Vec<String> = all.iter().map(|r| r.city.to_lowercase()).collect();
    let lowered_levels: Vec<String> = all.iter().map(|r| r.position_level.to_lowercase()).collect();

    Overview {
        total: all.len(),
        filtered: filtered.len(),
        top_cities: value_counts(filtered.iter().map(|r| r.city.as_str()), TOP_CITIES),
        salary: salary_summary(filtered.iter().copied()),
        city_suggestions: value_counts(lowered_cities.iter().map(String::as_str), SUGGESTIONS),
        level_suggestions: value_counts(lowered_levels.iter().map(String::as_str), SUGGESTIONS),
    }
}

/// Scoring parameters seeded from the whole dataset, with configured values on top.
///
/// Targets default to the dataset medians and are clamped into the range a user
/// could pick; the salary bandwidth defaults to a tenth of the salary range.
pub fn default_params(all: &[JobRecord], cfg: &HotFieldsConfig) -> ScoringParams {
    let salaries: Vec<f64> = all.iter().filter_map(|r| r.salary_mid).collect();
    let exps: Vec<f64> = all.iter().filter_map(|r| r.experience_years).collect();

    let (sal_min, sal_max) = min_max(&salaries).unwrap_or((0.0, 100.0));
    let default_sal = median(&salaries).unwrap_or(10.0);
    let exp_max = min_max(&exps).map_or(0.0, |(_, hi)| hi).max(20.0);
    let default_exp = median(&exps).unwrap_or(0.0);

    let range = sal_max - sal_min;
    let default_sigma_sal = if range > 0.0 { (range / 10.0).max(5.0) } else { 5.0 };

    ScoringParams {
        target_salary: cfg
            .target_salary
            .unwrap_or_else(|| default_sal.clamp(0.0, sal_max.max(1.0))),
        target_exp: cfg
            .target_exp
            .unwrap_or_else(|| default_exp.clamp(0.0, exp_max)),
        sigma_salary: cfg.sigma_salary.unwrap_or(default_sigma_sal),
        sigma_exp: cfg.sigma_exp,
        top_k: cfg.top_k,
        sample_limit_per_field: cfg.sample_limit_per_field,
    }
}
