//! Compiler runner: precondition checks, process launch and result
//! interpretation, specialised per [`CompilerKind`].

use crate::bibtex;
use crate::error::{CompileError, ExecutionFailure};
use crate::latex;
use crate::paths;
use crate::process::Invocation;
use proceedings_types::CompilerConfig;
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::info;

/// The kinds of external compiler that can be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerKind {
    /// A LaTeX engine (latex, pdflatex, xelatex, lualatex, ...)
    LaTeX,
    /// BibTeX, run on the `.aux` file of a LaTeX pass
    BibTeX,
}

/// Exchange-format class tags, one row per kind
const KIND_TAGS: &[(&str, CompilerKind)] = &[
    ("proceedings.LaTeX", CompilerKind::LaTeX),
    ("proceedings.BibTeX", CompilerKind::BibTeX),
];

impl CompilerKind {
    pub fn all() -> impl Iterator<Item = CompilerKind> {
        KIND_TAGS.iter().map(|(_, kind)| *kind)
    }

    /// Class tag used in the exchange format
    pub fn tag(self) -> &'static str {
        KIND_TAGS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(tag, _)| *tag)
            .unwrap_or_default()
    }

    pub fn from_tag(tag: &str) -> Option<CompilerKind> {
        KIND_TAGS
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, kind)| *kind)
    }

    /// File the process is pointed at for `document`
    pub fn target(self, document: &Path) -> PathBuf {
        match self {
            CompilerKind::LaTeX => document.to_path_buf(),
            CompilerKind::BibTeX => bibtex::aux_target(document),
        }
    }

    /// Extra verdict on a run whose process exited successfully
    pub fn post_check(self, target: &Path) -> Result<(), ExecutionFailure> {
        match self {
            CompilerKind::LaTeX => latex::check_emergency_stop(target),
            CompilerKind::BibTeX => Ok(()),
        }
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerKind::LaTeX => write!(f, "LaTeX"),
            CompilerKind::BibTeX => write!(f, "BibTeX"),
        }
    }
}

/// A configured compiler of a given kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    kind: CompilerKind,
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(kind: CompilerKind) -> Self {
        Self::with_config(kind, CompilerConfig::new())
    }

    pub fn with_config(kind: CompilerKind, config: CompilerConfig) -> Self {
        Self { kind, config }
    }

    pub fn latex(executable: impl Into<PathBuf>) -> Self {
        Self::with_config(CompilerKind::LaTeX, CompilerConfig::with_executable(executable))
    }

    pub fn bibtex(executable: impl Into<PathBuf>) -> Self {
        Self::with_config(CompilerKind::BibTeX, CompilerConfig::with_executable(executable))
    }

    pub fn kind(&self) -> CompilerKind {
        self.kind
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn name(&self) -> Option<&str> {
        self.config.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.set_name(name);
    }

    pub fn executable(&self) -> Option<&Path> {
        self.config.executable()
    }

    /// See [`CompilerConfig::set_executable`] for how the name is derived.
    pub fn set_executable(&mut self, executable: impl Into<PathBuf>) {
        self.config.set_executable(executable);
    }

    pub fn options(&self) -> &[String] {
        self.config.options()
    }

    pub fn set_options<I, S>(&mut self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_options(options);
    }

    /// Validate the executable and the document before anything is spawned.
    ///
    /// Returns the executable on success.
    pub fn check(&self, document: &Path) -> Result<&Path, CompileError> {
        let executable = self.executable().ok_or(CompileError::NoExecutable)?;

        let meta = std::fs::metadata(executable)
            .map_err(|_| CompileError::ExecutableMissing(executable.to_path_buf()))?;
        if meta.is_dir() {
            return Err(CompileError::ExecutableIsDirectory(executable.to_path_buf()));
        }
        if !is_executable(&meta) {
            return Err(CompileError::ExecutableNotExecutable(executable.to_path_buf()));
        }

        let meta = std::fs::metadata(document)
            .map_err(|_| CompileError::DocumentMissing(document.to_path_buf()))?;
        if meta.is_dir() {
            return Err(CompileError::DocumentIsDirectory(document.to_path_buf()));
        }

        Ok(executable)
    }

    /// Compile `document`.
    ///
    /// Runs `[executable] + options + [target]` in the target's directory
    /// and waits for it. Failures after the checks carry the command line.
    pub fn compile(&self, document: impl AsRef<Path>) -> Result<(), CompileError> {
        let document = document.as_ref();
        let executable = self.check(document)?;

        let target = paths::anchored(&self.kind.target(document));
        let invocation = Invocation::new(&paths::anchored(executable), self.options(), &target);

        invocation
            .run()
            .and_then(|()| self.kind.post_check(&target))
            .map_err(|cause| CompileError::Execution {
                command: invocation.command_line(),
                cause,
            })?;

        info!(
            compiler = self.name().unwrap_or_default(),
            kind = %self.kind,
            document = %document.display(),
            "compiled"
        );
        Ok(())
    }

    /// Whether the last run on `document` asked for another pass.
    ///
    /// Only LaTeX engines report this; other kinds always say no.
    pub fn requires_recompile(&self, document: impl AsRef<Path>) -> bool {
        match self.kind {
            CompilerKind::LaTeX => latex::requires_recompile(document.as_ref()),
            CompilerKind::BibTeX => false,
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name().unwrap_or("<unnamed>"),
            self.kind.tag(),
            self.executable()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<no executable>".to_string())
        )
    }
}

#[cfg(unix)]
fn is_executable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &Metadata) -> bool {
    true
}
