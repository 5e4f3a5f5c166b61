use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Runs a command line and returns its standard output.
pub trait Shell {
    fn run(&self, command: &str) -> Result<String>;
}

/// Runs command lines through `sh -c`, so pipes in discovery commands work.
pub struct SystemShell {
    program: String,
}

impl SystemShell {
    pub fn new() -> Self {
        Self {
            program: "sh".to_string(),
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for SystemShell {
    fn run(&self, command: &str) -> Result<String> {
        tracing::info!("Executing command: {}", command);

        let output = Command::new(&self.program)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| {
                tracing::warn!("Failed to launch {}: {}", command, source);
                Error::Launch {
                    command: command.to_string(),
                    source,
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            tracing::warn!("Command failed ({}): {}", output.status, command);
            tracing::warn!("  stdout: {}", stdout.trim());
            tracing::warn!("  stderr: {}", stderr);
            return Err(Error::CommandFailed {
                command: command.to_string(),
                status: output.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            tracing::debug!("stderr from {}: {}", command, stderr);
        }
        tracing::debug!("Command succeeded: {} ({} bytes)", command, stdout.len());

        Ok(stdout)
    }
}
