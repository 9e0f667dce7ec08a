use serde::Serialize;
use std::cmp::Ordering;

use crate::analyzer::hot_fields::FieldAccumulator;
use crate::analyzer::stats::median;
use crate::model::SampleRecord;
use crate::utils::round3;

/// How many postings of the winning field are shown as evidence.
pub const TOP_SAMPLES: usize = 10;

/// One row of the hot-field table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedField {
    pub field: String,
    pub score: f64,
    pub count: u32,
    pub avg_salary: f64,
    /// Median over the retained samples only, not every contributor.
    pub med_salary: Option<f64>,
    pub score_norm: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HotFieldsReport {
    pub ranked: Vec<RankedField>,
    /// Bar-chart series: field -> normalized score.
    pub chart: Vec<(String, f64)>,
    pub top_field: Option<String>,
    pub top_samples: Vec<SampleRecord>,
}

impl HotFieldsReport {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Higher score first, then more postings, then higher median; missing medians last.
fn by_rank(a: &RankedField, b: &RankedField) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| match (a.med_salary, b.med_salary) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Turns the accumulated aggregates into the `top_k` best fields.
pub fn rank_fields(acc: &FieldAccumulator, top_k: usize) -> Vec<RankedField> {
    if acc.is_empty() {
        return Vec::new();
    }

    let max_score = acc.iter().map(|(_, agg)| agg.score).fold(0.0, f64::max);

    let mut rows: Vec<RankedField> = acc
        .iter()
        .map(|(field, agg)| {
            let salaries: Vec<f64> = agg.samples.iter().map(|s| s.salary_mid).collect();
            RankedField {
                field: field.to_string(),
                score: agg.score,
                count: agg.count,
                avg_salary: round3(agg.sum_salary / agg.count.max(1) as f64),
                med_salary: median(&salaries).map(round3),
                score_norm: if max_score > 0.0 {
                    round3(agg.score / max_score)
                } else {
                    0.0
                },
            }
        })
        .collect();

    rows.sort_by(by_rank);
    rows.truncate(top_k);
    rows
}

pub fn build_report(acc: &FieldAccumulator, top_k: usize) -> HotFieldsReport {
    let ranked = rank_fields(acc, top_k);
    let top_field = ranked.first().map(|r| r.field.clone());
    let top_samples = top_field
        .as_deref()
        .and_then(|f| acc.get(f))
        .map(|agg| agg.samples.iter().take(TOP_SAMPLES).cloned().collect())
        .unwrap_or_default();
    let chart = ranked.iter().map(|r| (r.field.clone(), r.score_norm)).collect();

    HotFieldsReport {
        ranked,
        chart,
        top_field,
        top_samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::hot_fields::{ScoringParams, stream_recommend_fields};
    use crate::model::JobRecord;

    fn params(top_k: usize, sample_limit: usize) -> ScoringParams {
        ScoringParams {
            target_salary: 10.0,
            target_exp: 2.0,
            sigma_salary: 5.0,
            sigma_exp: 2.0,
            top_k,
            sample_limit_per_field: sample_limit,
        }
    }

    fn job(title: &str, fields: &str, salary: f64) -> JobRecord {
        JobRecord::new(title, "Hà Nội", "Nhân viên", fields, Some(salary), Some(2.0))
    }

    #[test]
    fn empty_accumulator_ranks_nothing() {
        let acc = FieldAccumulator::new(200);
        assert!(rank_fields(&acc, 5).is_empty());
        let report = build_report(&acc, 5);
        assert!(report.is_empty());
        assert!(report.top_field.is_none());
        assert!(report.top_samples.is_empty());
    }

    #[test]
    fn two_record_scenario_ranks_it_first() {
        let recs = vec![job("a", "IT", 10.0), job("b", "IT,Finance", 20.0)];
        let p = params(5, 200);
        let acc = stream_recommend_fields(&recs, &p);
        let ranked = rank_fields(&acc, p.top_k);

        let names: Vec<&str> = ranked.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(names, vec!["it", "finance"]);
        assert_eq!(ranked[0].score_norm, 1.0);
        assert_eq!(ranked[0].avg_salary, 15.0);
        assert_eq!(ranked[0].med_salary, Some(15.0));
        assert!((ranked[0].score - 1.135).abs() < 1e-3);
        assert_eq!(ranked[1].count, 1);
        assert_eq!(ranked[1].score_norm, 0.119);
    }

    #[test]
    fn equal_scores_break_on_median_then_first_seen() {
        // 7 and 13 sit the same distance from the target, so the weights are identical.
        let recs = vec![
            job("a", "alpha", 7.0),
            job("b", "beta", 13.0),
            job("c", "gamma", 7.0),
        ];
        let acc = stream_recommend_fields(&recs, &params(5, 200));
        let ranked = rank_fields(&acc, 5);
        assert_eq!(ranked[0].score, ranked[1].score);
        let names: Vec<&str> = ranked.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn repeated_field_outscores_single_posting() {
        let recs = vec![
            job("a", "solo", 10.0),
            job("b", "pair", 10.0),
            job("c", "pair", 10.0),
        ];
        let ranked = rank_fields(&stream_recommend_fields(&recs, &params(5, 200)), 5);
        assert_eq!(ranked[0].field, "pair");
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[1].score_norm, 0.5);
    }

    #[test]
    fn zero_sample_limit_leaves_median_undefined() {
        let recs = vec![job("a", "alpha", 10.0), job("b", "beta", 10.0)];
        let acc = stream_recommend_fields(&recs, &params(5, 0));
        let ranked = rank_fields(&acc, 5);
        assert!(ranked.iter().all(|r| r.med_salary.is_none()));
        assert_eq!(ranked[0].field, "alpha");
    }

    #[test]
    fn median_uses_retained_samples_only() {
        let recs: Vec<JobRecord> = (0..450)
            .map(|i| job("x", "ops", if i < 200 { 10.0 } else { 11.0 }))
            .collect();
        let ranked = rank_fields(&stream_recommend_fields(&recs, &params(5, 200)), 5);
        assert_eq!(ranked[0].count, 450);
        // Only the first 200 postings (all at 10) are kept as samples.
        assert_eq!(ranked[0].med_salary, Some(10.0));
        assert!((ranked[0].avg_salary - 10.556).abs() < 1e-9);
    }

    #[test]
    fn normalized_scores_stay_in_unit_range() {
        let recs: Vec<JobRecord> = (0..40)
            .map(|i| job("x", ["it", "sales", "hr", "law"][i % 4], 5.0 + i as f64))
            .collect();
        let acc = stream_recommend_fields(&recs, &params(20, 200));
        let ranked = rank_fields(&acc, 20);
        assert!(ranked.iter().all(|r| (0.0..=1.0).contains(&r.score_norm)));
        let top = ranked.iter().map(|r| r.score_norm).fold(0.0, f64::max);
        assert_eq!(top, 1.0);
    }

    #[test]
    fn truncates_to_top_k_and_exposes_samples() {
        let recs: Vec<JobRecord> = (0..30)
            .map(|i| job(&format!("job {i}"), "a, b, c, d, e", 10.0))
            .collect();
        let report = build_report(&stream_recommend_fields(&recs, &params(3, 200)), 3);
        assert_eq!(report.ranked.len(), 3);
        assert_eq!(report.chart.len(), 3);
        assert_eq!(report.top_field.as_deref(), Some("a"));
        assert_eq!(report.top_samples.len(), TOP_SAMPLES);
        assert_eq!(report.top_samples[0].job_title, "job 0");
    }
}
