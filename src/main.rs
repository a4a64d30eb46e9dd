//! `jdepend-cycles` — build a Java codebase, run JDepend, and report package
//! dependency cycles as CI issues.
//!
//! # Flow
//! 1. Parse CLI arguments and environment ([`cli`]).
//! 2. Load task parameters ([`config::load_task_request`]).
//! 3. Compile the codebase with the task's build command ([`runner::compile`]).
//! 4. Run JDepend into `<result_dir>/jdepend_output.xml` ([`jdepend::invoke`]).
//! 5. Normalize the report into `<result_dir>/result.json` ([`pipeline`]).
//! 6. Optionally print the issues ([`report`]).
//!
//! With `--report FILE`, steps 3 and 4 are skipped and `FILE` is normalized.

mod cli;
mod config;
mod error;
mod issues;
mod jdepend;
mod logging;
mod models;
mod pipeline;
mod report;
mod runner;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use cli::{Cli, PrintFormat};
use config::{load_task_request, TaskParams};
use jdepend::invoke::{resolve_java_home, AnalyzerCommand};
use models::RuleSet;
use pipeline::PipelineConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let work_dir = std::env::current_dir().context("cannot determine current directory")?;
    let result_dir = cli.result_dir.clone().unwrap_or_else(|| work_dir.clone());

    let params = match &cli.task_request {
        Some(path) => load_task_request(path)?,
        None => TaskParams::default(),
    };
    debug!(envs = ?params.envs, "task environment");

    let mut rules: RuleSet = params.rules.iter().cloned().collect();
    rules.extend(cli.rules.iter().cloned());
    if rules.is_empty() {
        warn!("no rules enabled; every finding will be dropped");
    }

    let report_path = match &cli.report {
        Some(report) => report.clone(),
        None => {
            let source_dir = cli
                .source_dir
                .as_deref()
                .context("--source-dir (or SOURCE_DIR) is required")?;
            info!(source_dir = %source_dir.display(), "analyzing");

            runner::compile(source_dir, params.build_cmd.as_deref(), &work_dir)?;

            let java_home = resolve_java_home(cli.java_home.as_deref())?;
            let output = result_dir.join(jdepend::REPORT_FILE);
            remove_stale_report(&output);

            let analyzer = AnalyzerCommand::new(&java_home, &cli.jdepend_jar, &output, source_dir);
            run_analyzer(&analyzer, cli.quiet);
            output
        }
    };

    let config = PipelineConfig {
        report_path,
        rules,
        output_path: result_dir.join(report::json::RESULT_FILE),
        locale: cli.lang,
    };
    let issues = pipeline::run(&config).context("failed to normalize JDepend report")?;

    match cli.print {
        Some(PrintFormat::Terminal) => report::terminal::render(&issues, &config.output_path),
        Some(PrintFormat::Json) => println!("{}", report::json::render(&issues)?),
        None => {}
    }

    if cli.fail_on_issues && !issues.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// A report left by an earlier run must not stand in for this one.
fn remove_stale_report(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed previous report"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), "cannot remove previous report: {}", e),
    }
}

fn run_analyzer(analyzer: &AnalyzerCommand, quiet: bool) {
    let pb = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("running JDepend");
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    analyzer.run();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
