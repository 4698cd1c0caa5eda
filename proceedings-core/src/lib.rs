//! # proceedings-core
//!
//! Core library for running external document compilers (LaTeX engines,
//! BibTeX) as subprocesses.
//!
//! This crate validates compiler and document paths, spawns the compiler,
//! interprets its exit status and log file, and converts compiler and
//! document descriptors to and from the YAML exchange format.

pub mod bibtex;
pub mod compiler;
pub mod error;
pub mod exchange;
pub mod latex;
pub mod paths;
pub mod process;
pub mod project;
pub mod registry;

pub use compiler::{Compiler, CompilerKind};
pub use error::{CompileError, ExchangeError, ExecutionFailure, ProjectError};
pub use exchange::ParseMode;
pub use project::Project;
pub use registry::{CompilerRegistry, DocumentRegistry};

pub use proceedings_types::{CompilerConfig, DocumentRef};
