//! External process execution: spawn a shell, capture its output, normalize
//! the outcome.

use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::config::Config;

/// Normalized outcome of one command execution.
///
/// A non-zero exit is a normal result with `success == false`, not an error;
/// see [`ExecError`] for the failures that prevent a result from existing.
/// Serializes as `{ output, exitCode, success }` with `error` included only
/// when the command wrote to its error stream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub output: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
    pub exit_code: i32,
    pub success: bool,
}

impl ExecutionResult {
    fn from_parts(output: String, error: String, exit_code: i32) -> Self {
        Self {
            output,
            error,
            exit_code,
            success: exit_code == 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    /// The shell process could not be launched at all. Distinct from a
    /// command that ran and exited non-zero.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The caller's deadline elapsed. The child process is killed and reaped
    /// before this is returned.
    #[error("execution cancelled after {after:?}")]
    Cancelled { after: Duration },

    #[error("i/o failure during execution: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Kill the process and fail with [`ExecError::Cancelled`] if it has not
    /// exited within this duration. No deadline by default.
    pub cancel_after: Option<Duration>,
}

/// The interpreter a command line is handed to.
///
/// On Windows, PowerShell when `SHELL_NAME` asks for it or PSModulePath
/// suggests it, cmd.exe otherwise. On Unix-like systems, `SHELL_NAME`, then
/// the `SHELL` environment variable, then `/bin/sh`.
#[derive(Debug, Clone)]
pub struct Shell {
    pub program: String,
    args: Vec<String>,
}

impl Shell {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn detect(cfg: &Config) -> Self {
        let name = cfg.get("SHELL_NAME").unwrap_or_default();
        if cfg!(windows) {
            let lower = name.to_ascii_lowercase();
            let prefer_ps = if lower.contains("powershell") {
                true
            } else if lower.contains("cmd") {
                false
            } else {
                // Fallback heuristic: if PSModulePath exists, prefer PowerShell
                !std::env::var("PSModulePath").unwrap_or_default().is_empty()
            };
            if prefer_ps {
                Self::new("powershell.exe", &["-NoLogo", "-NoProfile", "-Command"])
            } else {
                Self::new("cmd.exe", &["/c"])
            }
        } else {
            if !name.is_empty() && name != "auto" {
                return Self::new(&name, &["-c"]);
            }
            let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".into());
            Self::new(&shell, &["-c"])
        }
    }

    fn command(&self, command_line: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(command_line);
        cmd
    }
}

/// Runs rendered command lines, one independent process per call.
///
/// The executor holds no mutable state; concurrent `run` calls share nothing
/// beyond host resource limits.
#[derive(Debug, Clone)]
pub struct Executor {
    shell: Shell,
}

impl Executor {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Shell::detect(cfg))
    }

    /// Run `command_line` under the configured shell and capture both output
    /// streams in full. The result is only available once the process has
    /// exited; there is no incremental delivery. The two streams are drained
    /// independently, so their interleaving relative to each other is
    /// unspecified.
    pub async fn run(
        &self,
        command_line: &str,
        opts: &ExecOptions,
    ) -> Result<ExecutionResult, ExecError> {
        tracing::debug!(
            program = %self.shell.program,
            bytes = command_line.len(),
            "spawning command"
        );

        let mut cmd = self.shell.command(command_line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: self.shell.program.clone(),
            source,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Wait and drain concurrently so a full pipe cannot wedge the child.
        let capture = async {
            let (status, out, err) = tokio::join!(child.wait(), drain(stdout), drain(stderr));
            Ok::<_, std::io::Error>((status?, out?, err?))
        };

        let (status, out, err) = match opts.cancel_after {
            Some(deadline) => {
                let captured = tokio::time::timeout(deadline, capture).await;
                match captured {
                    Ok(done) => done?,
                    Err(_) => {
                        // Kill and reap before surfacing the cancellation so
                        // no process is left running.
                        child.kill().await?;
                        tracing::debug!(?deadline, "command cancelled, child killed");
                        return Err(ExecError::Cancelled { after: deadline });
                    }
                }
            }
            None => capture.await?,
        };

        // Exit by signal carries no code; follow the -1 convention.
        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(exit_code, "command completed");
        Ok(ExecutionResult::from_parts(out, err, exit_code))
    }
}

async fn drain<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut r) = reader {
        r.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serialization_omits_empty_error() {
        let ok = ExecutionResult::from_parts("hi\n".into(), String::new(), 0);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["output"], "hi\n");
        assert_eq!(json["exitCode"], 0);
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());

        let failed = ExecutionResult::from_parts(String::new(), "boom\n".into(), 2);
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], "boom\n");
        assert_eq!(json["success"], false);
    }
}
