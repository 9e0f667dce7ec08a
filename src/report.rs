// Plain-text and JSON rendering of analysis results.
use serde::Serialize;

use crate::analyzer::hot_fields::ScoringParams;
use crate::analyzer::overview::Overview;
use crate::analyzer::ranking::HotFieldsReport;
use crate::forecast::{ForecastOutcome, TAIL_ROWS};

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

pub fn render_overview(overview: &Overview) -> String {
    let mut msg = String::from("📊 Dataset overview\n");
    msg.push_str(&format!(
        "Postings before filtering: {} • after filtering: {}\n\n",
        overview.total, overview.filtered
    ));

    msg.push_str("Top cities by postings:\n");
    if overview.top_cities.is_empty() {
        msg.push_str("  (no city data after filtering)\n");
    }
    for (i, (city, n)) in overview.top_cities.iter().enumerate() {
        msg.push_str(&format!("  {:>2}. {:<30} {:>7}\n", i + 1, city, n));
    }

    msg.push_str("\nSalary (million VND/month):\n");
    match &overview.salary {
        Some(s) => msg.push_str(&format!(
            "  n = {} | min {:.2} | median {:.2} | mean {:.2} | max {:.2}\n",
            s.count, s.min, s.median, s.mean, s.max
        )),
        None => msg.push_str("  (no valid salary data after filtering)\n"),
    }

    msg.push_str("\nSuggested city values:\n");
    for (city, n) in &overview.city_suggestions {
        msg.push_str(&format!("  {} ({})\n", city, n));
    }
    msg.push_str("\nSuggested level values:\n");
    for (level, n) in &overview.level_suggestions {
        msg.push_str(&format!("  {} ({})\n", level, n));
    }
    msg
}

pub fn render_hot_fields(report: &HotFieldsReport, params: &ScoringParams) -> String {
    let mut msg = String::from("🔮 Hot fields by salary & experience\n");
    msg.push_str(&format!(
        "Target salary {:.2} (σ {:.2}) • target experience {:.2} years (σ {:.2})\n",
        params.target_salary, params.sigma_salary, params.target_exp, params.sigma_exp
    ));
    msg.push_str("score = exp(-(salary - target)² / 2σ_s²) × exp(-(exp - target)² / 2σ_e²)\n\n");

    if report.is_empty() {
        msg.push_str("No matching data yet. Loosen the filters or widen σ.\n");
        return msg;
    }

    msg.push_str(&format!(
        "{:>3}  {:<32} {:>10} {:>8} {:>10} {:>10}\n",
        "#", "Field", "Score 0-1", "Posts", "Avg sal", "Med sal"
    ));
    for (i, row) in report.ranked.iter().enumerate() {
        msg.push_str(&format!(
            "{:>3}  {:<32} {:>10.3} {:>8} {:>10.3} {:>10}\n",
            i + 1,
            row.field,
            row.score_norm,
            row.count,
            row.avg_salary,
            fmt_opt(row.med_salary)
        ));
    }

    if let Some(top) = &report.top_field {
        msg.push_str(&format!("\nSample postings for top field: {}\n", top));
        if report.top_samples.is_empty() {
            msg.push_str("  (no samples to show)\n");
        }
        for s in &report.top_samples {
            msg.push_str(&format!(
                "  • {} | {} | {} | {:.2} | exp {}\n",
                s.job_title,
                s.city,
                s.position_level,
                s.salary_mid,
                fmt_opt(s.experience_years)
            ));
        }
    }
    msg
}

pub fn render_forecast(outcome: &ForecastOutcome) -> String {
    let mut msg = String::from("🧭 Posting volume forecast\n");
    match outcome {
        ForecastOutcome::NoDateColumn => {
            msg.push_str("No date column found (e.g. posted_date). Add one to enable forecasting.\n")
        }
        ForecastOutcome::NoValidDates => {
            msg.push_str("No valid dates left after parsing the date column.\n")
        }
        ForecastOutcome::Disabled => {
            msg.push_str("Forecasting is disabled: set forecast.endpoint in config.json.\n")
        }
        ForecastOutcome::Failed { reason } => {
            msg.push_str(&format!("Could not run the forecast: {}\n", reason))
        }
        ForecastOutcome::Ready { history, forecast } => {
            msg.push_str(&format!(
                "History: {} days • forecast: {} days\n\n",
                history.len(),
                forecast.len()
            ));
            msg.push_str(&format!(
                "{:<12} {:>10} {:>10} {:>10}\n",
                "Date", "yhat", "lower", "upper"
            ));
            let skip = forecast.len().saturating_sub(TAIL_ROWS);
            for p in forecast.iter().skip(skip) {
                msg.push_str(&format!(
                    "{:<12} {:>10.2} {:>10.2} {:>10.2}\n",
                    p.ds, p.yhat, p.yhat_lower, p.yhat_upper
                ));
            }
        }
    }
    msg
}
