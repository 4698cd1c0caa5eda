//! Error types for compiling and for the exchange format.

use std::path::PathBuf;
use thiserror::Error;

/// Why a compile run failed.
///
/// The display strings are the messages reported to users.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("No executable defined!")]
    NoExecutable,

    #[error("Executable does not exist: {}", .0.display())]
    ExecutableMissing(PathBuf),

    #[error("Executable points to a directory: {}", .0.display())]
    ExecutableIsDirectory(PathBuf),

    #[error("Executable cannot be executed: {}", .0.display())]
    ExecutableNotExecutable(PathBuf),

    #[error("Document does not exist: {}", .0.display())]
    DocumentMissing(PathBuf),

    #[error("Document points to a directory: {}", .0.display())]
    DocumentIsDirectory(PathBuf),

    #[error("Failed to execute: {command}\n{cause}")]
    Execution {
        command: String,
        cause: ExecutionFailure,
    },
}

impl CompileError {
    /// True if the compiler was never started
    pub fn is_precondition(&self) -> bool {
        !matches!(self, CompileError::Execution { .. })
    }
}

/// Failure of a spawned compiler process
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    #[error("Process exited with: {0}")]
    ExitCode(i32),

    #[error("Process terminated: {0}")]
    Terminated(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Compilation failed!")]
    EmergencyStop,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Missing required key: {0}")]
    MissingKey(&'static str),

    #[error("Invalid value for key {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Unknown compiler class: {0}")]
    UnknownClass(String),

    #[error("Expected a mapping")]
    NotAMapping,

    #[error("Entry {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ExchangeError>,
    },
}

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Failed to read project file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid {section}: {source}")]
    Exchange {
        section: &'static str,
        #[source]
        source: ExchangeError,
    },

    #[error("Invalid project layout: {0}")]
    InvalidLayout(String),
}
