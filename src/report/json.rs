use std::path::Path;

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::models::Issue;

/// File name of the issue list inside the result directory.
pub const RESULT_FILE: &str = "result.json";

/// Serialize issues as a 2-space indented JSON array.
pub fn render(issues: &[Issue]) -> Result<String> {
    Ok(serde_json::to_string_pretty(issues)?)
}

/// Write the issue list to `path`, replacing any previous file.
///
/// An empty slice still produces a file containing `[]`.
pub fn write(issues: &[Issue], path: &Path) -> Result<()> {
    let content = render(issues)?;

    let write_err = |source| PipelineError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)?;

    info!(path = %path.display(), count = issues.len(), "wrote issues");
    Ok(())
}
