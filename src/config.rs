use std::path::Path;

use serde::Deserialize;

use crate::error::{PipelineError, Result};

/// Root of the task request file written by the CI host.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub task_params: TaskParams,
}

/// Parameters of a single analysis task.
#[derive(Debug, Default, Deserialize)]
pub struct TaskParams {
    /// Enabled rule identifiers.
    #[serde(default)]
    pub rules: Vec<String>,
    /// Shell command that compiles the codebase.
    #[serde(default)]
    pub build_cmd: Option<String>,
    /// Environment description from the host. Only logged.
    #[serde(default)]
    pub envs: Option<serde_json::Value>,
}

/// Load `task_params` from a task request file.
///
/// The file is JSON unless its extension is `.toml`.
pub fn load_task_request(path: &Path) -> Result<TaskParams> {
    let content = std::fs::read_to_string(path).map_err(|source| PipelineError::TaskRequest {
        path: path.to_path_buf(),
        source,
    })?;

    let format_err = |message: String| PipelineError::TaskRequestFormat {
        path: path.to_path_buf(),
        message,
    };

    let request: TaskRequest = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| format_err(e.to_string()))?,
        _ => serde_json::from_str(&content).map_err(|e| format_err(e.to_string()))?,
    };

    Ok(request.task_params)
}
