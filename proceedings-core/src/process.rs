//! Spawning a compiler process and waiting for it.

use crate::error::ExecutionFailure;
use crate::paths;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// A fully assembled compiler invocation:
/// `[executable] + options + [target]`, run next to the target.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(executable: &Path, options: &[String], target: &Path) -> Self {
        let mut args: Vec<OsString> = options.iter().map(OsString::from).collect();
        args.push(target.as_os_str().to_owned());

        Self {
            program: executable.to_path_buf(),
            args,
            working_dir: paths::working_dir(target).map(Path::to_path_buf),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments after the program: options, then the target
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Space-separated command line, for messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the process to completion; stdout and stderr are inherited.
    ///
    /// Blocks until the process exits. There is no timeout.
    pub fn run(&self) -> Result<(), ExecutionFailure> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        debug!(command = %self.command_line(), cwd = ?self.working_dir, "spawning compiler");
        let status = command.status()?;

        if status.success() {
            Ok(())
        } else if let Some(code) = status.code() {
            Err(ExecutionFailure::ExitCode(code))
        } else {
            Err(ExecutionFailure::Terminated(status.to_string()))
        }
    }
}
