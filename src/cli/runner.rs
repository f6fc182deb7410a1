//! Subprocess execution with streamed output and timeouts.

use crate::error::{CliError, PackagerError};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Timeout for a PyInstaller build (15 minutes).
/// Collecting a large Python GUI and its libraries can be slow on first runs.
pub const BUILD_TIMEOUT: Duration = Duration::from_secs(900);

/// Timeout for `pip install pyinstaller` (5 minutes).
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Runs a command, streaming stdout and stderr through the runtime output.
///
/// Both pipes are pumped concurrently so output appears live and neither
/// side can fill its buffer and stall the child. The child is killed when
/// `timeout` elapses.
///
/// # Arguments
///
/// * `command` - Fully configured command (program and arguments)
/// * `display_name` - Name used in messages (e.g., "pyinstaller")
/// * `timeout` - Wall-clock limit before the child is killed
/// * `runtime_config` - Runtime configuration for output
///
/// # Returns
///
/// The child's exit status. Callers decide what a non-zero status means.
pub async fn run_streaming(
    mut command: Command,
    display_name: &str,
    timeout: Duration,
    runtime_config: &super::RuntimeConfig,
) -> Result<std::process::ExitStatus, PackagerError> {
    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            PackagerError::Cli(CliError::ExecutionFailed {
                command: display_name.to_string(),
                reason: e.to_string(),
            })
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Stream both pipes to completion, then reap the child, all under one
    // timeout so a child that hangs mid-output still gets killed.
    let result = tokio::time::timeout(timeout, async {
        tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    let mut lines = BufReader::new(stdout).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        let _ = runtime_config.indent(&line);
                    }
                }
            },
            async {
                if let Some(stderr) = stderr {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        let _ = runtime_config.indent(&line);
                    }
                }
            }
        );
        child.wait().await
    })
    .await;

    match result {
        Ok(Ok(status)) => Ok(status),
        Ok(Err(e)) => Err(PackagerError::Cli(CliError::ExecutionFailed {
            command: display_name.to_string(),
            reason: e.to_string(),
        })),
        Err(_elapsed) => {
            runtime_config.warn(&format!(
                "{} timed out after {} minutes, terminating...",
                display_name,
                timeout.as_secs() / 60
            ))?;

            if let Err(e) = child.kill().await {
                eprintln!("Warning: Failed to kill {} process: {}", display_name, e);
            }

            let _ = tokio::time::timeout(Duration::from_secs(10), child.wait()).await;

            Err(PackagerError::Cli(CliError::ExecutionFailed {
                command: display_name.to_string(),
                reason: format!(
                    "{} timed out after {} minutes.\n\
                     \n\
                     This usually indicates:\n\
                     • a very slow build (large dependency collection)\n\
                     • an unexpected interactive prompt in the tool\n\
                     • system resource constraints\n\
                     \n\
                     Re-run after checking available memory and disk space.",
                    display_name,
                    timeout.as_secs() / 60
                ),
            }))
        }
    }
}
