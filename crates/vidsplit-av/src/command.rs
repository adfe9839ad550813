//! Builder for running external tool commands to completion.

use crate::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// The call blocks until the child exits. There is no timeout.
///
/// # Example
///
/// ```no_run
/// use vidsplit_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "error", "-show_entries", "format=duration"])
///     .arg("/path/to/video.mp4")
///     .output()?;
/// println!("{}", output.stdout.trim());
/// # Ok::<(), vidsplit_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<OsString>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<OsString>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Short name of the program, used in error messages.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Arguments passed to the program, for logging and tests.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Run the command and capture its output without inspecting the exit status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if the executable does not exist and
    /// [`Error::Io`] for any other spawn or wait failure.
    pub fn output(&self) -> Result<ToolOutput> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(self.program_name())
                } else {
                    Error::Io(e)
                }
            })?;

        Ok(ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run the command, failing if it exits with a non-zero status.
    ///
    /// # Errors
    ///
    /// Everything [`ToolCommand::output`] returns, plus [`Error::ToolFailed`]
    /// carrying the trimmed stderr when the exit status is not success.
    pub fn execute(&self) -> Result<ToolOutput> {
        let output = self.output()?;

        if !output.status.success() {
            return Err(Error::tool_failed(
                self.program_name(),
                format!(
                    "exited with status {}: {}",
                    output.status,
                    output.stderr.trim()
                ),
            ));
        }

        Ok(output)
    }
}
