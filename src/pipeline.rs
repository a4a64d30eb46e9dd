//! Report normalization: load the JDepend report, extract cycles, gate them
//! by rule, and write `result.json`.
//!
//! A missing or empty report ends the run with an empty issue list; a
//! malformed report or an unwritable output path aborts before anything is
//! written.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::issues::map_finding;
use crate::jdepend::cycles::extract_cycles;
use crate::jdepend::xml::{load_report, AnalysisReport};
use crate::models::{Issue, Locale, RuleSet};
use crate::report;

/// Everything the normalizer needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub report_path: PathBuf,
    pub rules: RuleSet,
    pub output_path: PathBuf,
    pub locale: Locale,
}

/// Run the normalizer end to end and return the issues that were written.
pub fn run(config: &PipelineConfig) -> Result<Vec<Issue>> {
    let issues = match load_report(&config.report_path)? {
        Some(report) => {
            info!(path = %config.report_path.display(), "loaded analyzer report");
            normalize(&report, &config.rules, config.locale)
        }
        None => {
            warn!(path = %config.report_path.display(), "analyzer report is missing or empty");
            Vec::new()
        }
    };

    report::json::write(&issues, &config.output_path)?;
    Ok(issues)
}

/// Map every cycle in `report` to an issue, keeping only enabled rules.
pub fn normalize(report: &AnalysisReport, rules: &RuleSet, locale: Locale) -> Vec<Issue> {
    let mut found = 0usize;
    let issues: Vec<Issue> = extract_cycles(report)
        .inspect(|_| found += 1)
        .filter_map(|finding| map_finding(&finding, rules, locale))
        .collect();

    info!(cycles = found, issues = issues.len(), "normalized cycles");
    issues
}
