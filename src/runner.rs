use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// Base name of the generated build launcher.
pub const LAUNCHER_NAME: &str = "tca_build";

/// Write `command` into an executable launcher script inside `dir`.
///
/// Returns the script path and the command line that runs it.
pub fn write_launcher(dir: &Path, command: &str, name: &str) -> Result<(PathBuf, String)> {
    let ext = if cfg!(windows) { "bat" } else { "sh" };
    let path = dir.join(format!("{}.{}", name, ext));

    std::fs::write(&path, command).map_err(|source| PipelineError::OutputWrite {
        path: path.clone(),
        source,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o777)).map_err(
            |source| PipelineError::OutputWrite {
                path: path.clone(),
                source,
            },
        )?;
    }

    debug!(path = %path.display(), "generated launcher");

    let command_line = if cfg!(windows) {
        format!("\"{}\"", path.display())
    } else {
        format!("bash \"{}\"", path.display())
    };
    Ok((path, command_line))
}

/// Run `command_line` through the platform shell in `cwd`, forwarding each
/// output line (stdout and stderr merged) to the log.
pub fn run_streaming(command_line: &str, cwd: &Path) -> Result<()> {
    let merged = format!("{} 2>&1", command_line);
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&merged);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&merged);
        c
    };

    let spawn_err = |source| PipelineError::CommandSpawn {
        command: command_line.to_string(),
        source,
    };

    let start = Instant::now();
    let mut child = cmd
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(spawn_err)?;

    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&line);
                    let text = text.trim();
                    if !text.is_empty() {
                        info!(target: "build", "{}", text);
                    }
                }
                Err(e) => {
                    debug!("stopped reading command output: {}", e);
                    break;
                }
            }
        }
    }

    let status = child.wait().map_err(spawn_err)?;
    if !status.success() {
        return Err(PipelineError::CommandFailed {
            command: command_line.to_string(),
            code: status.code(),
        });
    }

    info!(elapsed = ?start.elapsed(), "command finished");
    Ok(())
}

/// Build the codebase with the task's build command.
///
/// JDepend reads compiled classes, so a build command is mandatory.
pub fn compile(source_dir: &Path, build_cmd: Option<&str>, work_dir: &Path) -> Result<()> {
    let build_cmd = build_cmd
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(PipelineError::MissingBuildCommand)?;

    info!(cmd = build_cmd, "compile start");
    let (_, command_line) = write_launcher(work_dir, build_cmd, LAUNCHER_NAME)?;
    run_streaming(&command_line, source_dir)?;
    info!("compile done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_build_command_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        for cmd in [None, Some(""), Some("   ")] {
            let err = compile(dir.path(), cmd, dir.path()).unwrap_err();
            assert!(matches!(err, PipelineError::MissingBuildCommand));
        }
    }

    #[test]
    fn test_write_launcher_keeps_command_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let (path, command_line) =
            write_launcher(dir.path(), "mvn -q package", LAUNCHER_NAME).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "mvn -q package");
        assert!(command_line.contains(&path.display().to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_launcher_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let (path, _) = write_launcher(dir.path(), "true", LAUNCHER_NAME).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_streaming_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        run_streaming("echo building", dir.path()).unwrap();

        let err = run_streaming("exit 3", dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::CommandFailed { code: Some(3), .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_compile_runs_in_source_dir() {
        let src = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        compile(src.path(), Some("touch built.marker"), work.path()).unwrap();
        assert!(src.path().join("built.marker").exists());
    }
}
