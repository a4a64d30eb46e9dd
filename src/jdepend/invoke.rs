use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{PipelineError, Result};

/// Main class of JDepend's XML front end.
pub const XML_UI_CLASS: &str = "jdepend.xmlui.JDepend";

/// Jar shipped next to the tool.
pub const DEFAULT_JAR: &str = "lib/jdepend-2.10.jar";

/// A fully resolved JDepend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerCommand {
    pub java_bin: PathBuf,
    pub jar: PathBuf,
    pub output: PathBuf,
    pub source_dir: PathBuf,
}

impl AnalyzerCommand {
    pub fn new(java_home: &Path, jar: &Path, output: &Path, source_dir: &Path) -> Self {
        Self {
            java_bin: java_bin(java_home),
            jar: jar.to_path_buf(),
            output: output.to_path_buf(),
            source_dir: source_dir.to_path_buf(),
        }
    }

    pub fn args(&self) -> Vec<String> {
        vec![
            "-cp".to_string(),
            self.jar.display().to_string(),
            XML_UI_CLASS.to_string(),
            "-file".to_string(),
            self.output.display().to_string(),
            self.source_dir.display().to_string(),
        ]
    }

    /// Run JDepend to completion.
    ///
    /// The exit status is only logged: whether the report exists afterwards
    /// decides what the run produces.
    pub fn run(&self) {
        debug!(cmd = %self, "running analyzer");
        match Command::new(&self.java_bin).args(self.args()).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(code = ?status.code(), "analyzer exited unsuccessfully"),
            Err(e) => warn!(java = %self.java_bin.display(), "failed to start analyzer: {}", e),
        }
    }
}

impl std::fmt::Display for AnalyzerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.java_bin.display(), self.args().join(" "))
    }
}

/// Resolve the JDK home: explicit value first, then `JAVA_HOME`.
pub fn resolve_java_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(home) = explicit {
        return Ok(home.to_path_buf());
    }
    std::env::var_os("JAVA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or(PipelineError::MissingJavaHome)
}

fn java_bin(java_home: &Path) -> PathBuf {
    let exe = if cfg!(windows) { "java.exe" } else { "java" };
    java_home.join("bin").join(exe)
}
