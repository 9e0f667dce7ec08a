use serde::Deserialize;

use crate::model::JobRecord;
use crate::normalizer::{norm_set, norm_text};

/// City / level / field-keyword predicates applied before any analysis.
///
/// Empty selections impose no constraint. With the `*_partial` toggles on,
/// a selected value matches any record whose key contains it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub cities: Vec<String>,
    pub levels: Vec<String>,
    /// Comma-separated keywords matched against the job fields text.
    pub fields_keywords: String,
    pub city_partial: bool,
    pub level_partial: bool,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            cities: Vec::new(),
            levels: Vec::new(),
            fields_keywords: String::new(),
            city_partial: true,
            level_partial: true,
        }
    }
}

/// Normalized form of a [`RecordFilter`], built once per run.
struct Predicates {
    cities: Vec<String>,
    levels: Vec<String>,
    keywords: Vec<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.levels.is_empty() && self.fields_keywords.trim().is_empty()
    }

    fn predicates(&self) -> Predicates {
        let keywords = self
            .fields_keywords
            .split(',')
            .filter(|kw| !kw.trim().is_empty())
            .map(norm_text)
            .collect();
        Predicates {
            cities: norm_set(&self.cities),
            levels: norm_set(&self.levels),
            keywords,
        }
    }

    /// Returns the records passing every active predicate, in input order.
    pub fn apply<'a>(&self, records: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        let p = self.predicates();
        records
            .iter()
            .filter(|r| matches_key(&r.city_norm, &p.cities, self.city_partial))
            .filter(|r| matches_key(&r.level_norm, &p.levels, self.level_partial))
            .filter(|r| p.keywords.is_empty() || p.keywords.iter().any(|kw| r.fields_norm.contains(kw.as_str())))
            .collect()
    }
}

fn matches_key(key: &str, wanted: &[String], partial: bool) -> bool {
    if wanted.is_empty() {
        return true;
    }
    if partial {
        wanted.iter().any(|w| key.contains(w.as_str()))
    } else {
        wanted.iter().any(|w| w == key)
    }
}
