//! External tool execution.
//!
//! Packaging tools are reached through the [`CommandRunner`] capability so
//! the pipeline can be driven against a recording fake in tests.

use crate::bundler::error::{Error, Result};
use std::{future::Future, io, path::Path, process::Stdio};

/// Exit code and combined output of a finished command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// stdout followed by stderr, lossily decoded
    pub output: String,
}

impl CommandOutput {
    /// True when the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion and reports its exit status and output.
///
/// Implementations must not return an error for a non-zero exit; that is
/// reported through [`CommandOutput::code`].
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, waiting for it to exit.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runs commands on the host with `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let resolved = which::which(program).map_err(|e| Error::CommandFailed {
            command: program.to_string(),
            error: io::Error::new(io::ErrorKind::NotFound, e),
        })?;

        log::debug!("Running {} {}", resolved.display(), args.join(" "));

        let output = tokio::process::Command::new(&resolved)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::CommandFailed {
                command: program.to_string(),
                error: e,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            code: output.status.code(),
            output: combined,
        })
    }
}

/// Runs a packaging tool and fails with [`Error::ToolFailed`] on non-zero exit.
pub async fn run_tool<R: CommandRunner>(
    runner: &R,
    program: &str,
    args: &[String],
) -> Result<CommandOutput> {
    let output = runner.run(program, args).await?;

    if !output.success() {
        return Err(Error::ToolFailed {
            command: program.to_string(),
            code: output.code,
            output: output.output,
        });
    }

    if !output.output.is_empty() {
        log::debug!("{} output:\n{}", program, output.output.trim_end());
    }

    Ok(output)
}

/// Converts a path into a tool argument.
pub fn path_arg(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        Error::GenericError(format!(
            "Invalid path (contains non-UTF8 characters): {}",
            path.display()
        ))
    })
}
