//! Command execution
//!
//! [`CommandExecutor`] is the seam between the runner and the operating system:
//! [`ProcessExecutor`] spawns real processes, [`DryRunExecutor`] only logs.

use super::MigrationCommand;
use eyre::{Context, Result};

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// `harness-upgrade` reports some failures on stderr with a zero exit
    /// status, so any stderr output counts as a failure.
    pub fn is_failure(&self) -> bool {
        !self.success || !self.stderr.trim().is_empty()
    }
}

/// Runs a command to completion and captures its output
pub trait CommandExecutor: Send + Sync {
    /// # Errors
    /// Returns an error if the command cannot be started
    fn execute(
        &self,
        command: &MigrationCommand,
    ) -> impl std::future::Future<Output = Result<CommandOutput>> + Send;
}

/// Strip the color reset sequence `harness-upgrade` appends to its lines
fn clean_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace("\x1b[0m", "")
}

/// Executor spawning real processes, without a shell
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, command: &MigrationCommand) -> Result<CommandOutput> {
        log::info!("Running command");
        log::debug!("Command: {}", command);

        let output = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", command.program))?;

        if !output.status.success() {
            log::debug!("{} exited with {}", command.program, output.status);
        }

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: clean_output(&output.stdout),
            stderr: clean_output(&output.stderr),
        })
    }
}

/// Executor that logs commands instead of running them
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl CommandExecutor for DryRunExecutor {
    async fn execute(&self, command: &MigrationCommand) -> Result<CommandOutput> {
        log::info!("Dry run, skipping: {}", command);
        Ok(CommandOutput::succeeded(""))
    }
}
