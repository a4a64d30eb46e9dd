//! Fatal conditions of a run.
//!
//! A missing or empty analyzer report and a report without a `Cycles`
//! section are not errors; they surface as "no findings" instead.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("JDepend analyzes compiled classes; a build command is required")]
    MissingBuildCommand,

    #[error("`{command}` failed with exit code {}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to start `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("no JDK found; pass --java-home or set JDK_11_HOME / JAVA_HOME")]
    MissingJavaHome,

    #[error("failed to read task request {}", .path.display())]
    TaskRequest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid task request {}: {message}", .path.display())]
    TaskRequestFormat { path: PathBuf, message: String },

    #[error("failed to read analyzer report {}", .path.display())]
    ReportRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed analyzer report {}: {message}", .path.display())]
    MalformedReport { path: PathBuf, message: String },

    #[error("failed to write {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = PipelineError::CommandFailed {
            command: "bash tca_build.sh".to_string(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "`bash tca_build.sh` failed with exit code 2"
        );

        let killed = PipelineError::CommandFailed {
            command: "bash tca_build.sh".to_string(),
            code: None,
        };
        assert!(killed.to_string().ends_with("exit code none"));
    }
}
