//! Shared types for proceedings
//!
//! This crate provides the plain descriptors used across the proceedings
//! crates: how an external compiler is invoked, and which compiler a
//! document is processed with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Invocation settings of an external compiler (LaTeX engine, BibTeX, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerConfig {
    name: Option<String>,
    executable: Option<PathBuf>,
    options: Vec<String>,
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for the given executable, with the name derived from it
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        let mut config = Self::new();
        config.set_executable(executable);
        config
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Set the executable.
    ///
    /// If no name has been set yet, the name becomes the executable's file
    /// name without its extension (`/usr/bin/pdflatex` gives `pdflatex`).
    pub fn set_executable(&mut self, executable: impl Into<PathBuf>) {
        let executable = executable.into();
        if self.name.is_none() {
            self.name = derive_name(&executable);
        }
        self.executable = Some(executable);
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Replace the additional command-line options
    pub fn set_options<I, S>(&mut self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
    }
}

fn derive_name(executable: &Path) -> Option<String> {
    executable
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// A document and the name of the compiler that processes it
///
/// The compiler is referenced by name only; whether that name resolves is
/// up to whoever owns the compiler list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub compiler: String,
    pub file: PathBuf,
}

impl DocumentRef {
    pub fn new(compiler: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            compiler: compiler.into(),
            file: file.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.compiler, self.file.display())
    }
}
