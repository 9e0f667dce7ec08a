use tracing::{debug, info};

use crate::analyzer::hot_fields::{ScoringParams, stream_recommend_fields};
use crate::analyzer::overview::{Overview, build_overview};
use crate::analyzer::ranking::{HotFieldsReport, build_report};
use crate::model::JobRecord;

/// Trait defining the interface for a postings analyzer.
pub trait Analyzer {
    /// Counts and distributions for the overview report.
    fn overview(&self, all: &[JobRecord], filtered: &[&JobRecord]) -> Overview;
    /// Ranks fields by how closely their postings match the target profile.
    fn hot_fields(&self, records: &[&JobRecord], params: &ScoringParams) -> HotFieldsReport;
}

/// Implementation of the postings analyzer.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn overview(&self, all: &[JobRecord], filtered: &[&JobRecord]) -> Overview {
        let overview = build_overview(all, filtered);
        info!(
            "Overview: {} postings before filtering, {} after",
            overview.total, overview.filtered
        );
        overview
    }

    fn hot_fields(&self, records: &[&JobRecord], params: &ScoringParams) -> HotFieldsReport {
        debug!("Scoring {} postings with {:?}", records.len(), params);
        let acc = stream_recommend_fields(records.iter().copied(), params);
        info!("Accumulated {} distinct fields", acc.len());
        build_report(&acc, params.top_k)
    }
}

/// Postings the hot-field run scores: the filtered subset, or everything when
/// the filters matched nothing.
pub fn scoring_base<'a>(all: &'a [JobRecord], filtered: &[&'a JobRecord]) -> Vec<&'a JobRecord> {
    if filtered.is_empty() {
        info!("Filters matched no postings, scoring the full dataset");
        all.iter().collect()
    } else {
        filtered.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RecordFilter;

    fn dataset() -> Vec<JobRecord> {
        vec![
            JobRecord::new("Dev", "Hà Nội", "Nhân viên", "IT - Phần mềm", Some(20.0), Some(3.0)),
            JobRecord::new("Kế toán", "Huế", "Nhân viên", "Kế toán", Some(9.0), Some(1.0)),
        ]
    }

    #[test]
    fn scoring_base_falls_back_to_full_dataset() {
        let all = dataset();
        let filter = RecordFilter {
            cities: vec!["Cần Thơ".into()],
            ..Default::default()
        };
        let filtered = filter.apply(&all);
        assert!(filtered.is_empty());
        assert_eq!(scoring_base(&all, &filtered).len(), 2);
    }

    #[test]
    fn scoring_base_keeps_non_empty_subset() {
        let all = dataset();
        let filtered = vec![&all[1]];
        let base = scoring_base(&all, &filtered);
        assert_eq!(base.len(), 1);
        assert_eq!(base[0].job_title, "Kế toán");
    }

    #[test]
    fn hot_fields_over_filtered_subset() {
        let all = dataset();
        let filter = RecordFilter {
            cities: vec!["ha noi".into()],
            ..Default::default()
        };
        let filtered = filter.apply(&all);
        let params = ScoringParams {
            target_salary: 20.0,
            target_exp: 3.0,
            sigma_salary: 5.0,
            sigma_exp: 2.0,
            top_k: 3,
            sample_limit_per_field: 200,
        };
        let report = AnalyzerImpl::new().hot_fields(&filtered, &params);
        let names: Vec<&str> = report.ranked.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(names, vec!["it", "phan mem"]);
        assert_eq!(report.top_samples.len(), 1);
    }
}
