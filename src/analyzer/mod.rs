// Analysis over job postings: field scoring, ranking and dataset overview.

pub mod fields;
pub mod hot_fields;
pub mod job_analysis;
pub mod overview;
pub mod ranking;
pub mod stats;

// Re-export the main Analyzer implementation for ease of use.
pub use job_analysis::{Analyzer, AnalyzerImpl};
