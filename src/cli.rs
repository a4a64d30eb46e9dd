use std::path::PathBuf;

use clap::Parser;

use crate::jdepend::invoke::DEFAULT_JAR;
use crate::models::Locale;

#[derive(Parser, Debug)]
#[command(
    name = "jdepend-cycles",
    about = "Build a Java codebase, run JDepend, and report package dependency cycles",
    version
)]
pub struct Cli {
    /// Codebase to build and analyze
    #[arg(long, env = "SOURCE_DIR", required_unless_present = "report")]
    pub source_dir: Option<PathBuf>,

    /// Directory receiving jdepend_output.xml and result.json [default: current directory]
    #[arg(long, env = "RESULT_DIR")]
    pub result_dir: Option<PathBuf>,

    /// Task request file (JSON, or TOML with a .toml extension)
    #[arg(long, env = "TASK_REQUEST")]
    pub task_request: Option<PathBuf>,

    /// JDK used to launch JDepend [fallback: JAVA_HOME]
    #[arg(long, env = "JDK_11_HOME")]
    pub java_home: Option<PathBuf>,

    /// JDepend jar
    #[arg(long, value_name = "JAR", default_value = DEFAULT_JAR)]
    pub jdepend_jar: PathBuf,

    /// Normalize an existing JDepend XML report; skips build and analysis
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Enable a rule in addition to the task request's rules (repeatable)
    #[arg(long = "rule", value_name = "ID")]
    pub rules: Vec<String>,

    /// Also print the issues to stdout
    #[arg(long, value_name = "FORMAT")]
    pub print: Option<PrintFormat>,

    /// Language of issue messages
    #[arg(long, default_value = "en", value_name = "LANG")]
    pub lang: Locale,

    /// Exit with code 1 when any issue is reported
    #[arg(long)]
    pub fail_on_issues: bool,

    /// More log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PrintFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_mode_needs_no_source_dir() {
        let cli = Cli::try_parse_from([
            "jdepend-cycles",
            "--report",
            "out.xml",
            "--rule",
            "Package_Dependency_Cycles",
            "--lang",
            "zh",
        ])
        .unwrap();
        assert_eq!(cli.report, Some(PathBuf::from("out.xml")));
        assert_eq!(cli.rules, vec!["Package_Dependency_Cycles"]);
        assert_eq!(cli.lang, Locale::Zh);
        assert_eq!(cli.jdepend_jar, PathBuf::from(DEFAULT_JAR));
    }

    #[test]
    fn test_explicit_flags_parse() {
        let cli = Cli::try_parse_from([
            "jdepend-cycles",
            "--source-dir",
            "/src",
            "--result-dir",
            "/out",
            "--print",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.source_dir, Some(PathBuf::from("/src")));
        assert_eq!(cli.result_dir, Some(PathBuf::from("/out")));
        assert!(matches!(cli.print, Some(PrintFormat::Json)));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_print_flag_values() {
        let cli = Cli::try_parse_from(["jdepend-cycles", "--report", "r.xml", "--print", "terminal"])
            .unwrap();
        assert!(matches!(cli.print, Some(PrintFormat::Terminal)));

        let cli = Cli::try_parse_from(["jdepend-cycles", "--report", "r.xml"]).unwrap();
        assert!(cli.print.is_none());

        assert!(Cli::try_parse_from(["jdepend-cycles", "--report", "r.xml", "--format", "json"]).is_err());
    }
}
