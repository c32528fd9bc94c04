use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::time;
use tracing::{debug, warn};

/// Placeholder written into string fields whose command produced nothing usable.
pub const UNAVAILABLE: &str = "N/A";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} timed out after {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("{program} exited with {status}")]
    NonZeroExit { program: String, status: String },
    #[error("{program} produced unusable output: {reason}")]
    Unparsable { program: String, reason: String },
}

/// Runs external programs with a per-call timeout and returns trimmed stdout.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let start = Instant::now();
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        let output = match time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(CommandError::Spawn {
                    program: program.to_string(),
                    source,
                })
            }
            Err(_elapsed) => {
                return Err(CommandError::TimedOut {
                    program: program.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        debug!(
            program,
            elapsed = %humantime::format_duration(start.elapsed()),
            "command finished"
        );

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                program: program.to_string(),
                status: output.status.to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|err| CommandError::Unparsable {
            program: program.to_string(),
            reason: err.to_string(),
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Err(CommandError::Unparsable {
                program: program.to_string(),
                reason: "empty output".to_string(),
            });
        }
        Ok(text.to_string())
    }

    /// Like [`run`](Self::run) but collapses every failure into [`UNAVAILABLE`].
    pub async fn run_or_unavailable(&self, program: &str, args: &[&str]) -> String {
        match self.run(program, args).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "command unavailable");
                UNAVAILABLE.to_string()
            }
        }
    }
}
