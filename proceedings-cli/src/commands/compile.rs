//! `latex` and `bibtex` commands: run one compiler on one document.

use anyhow::{bail, Result};
use proceedings_core::{Compiler, CompilerConfig, CompilerKind};
use std::path::Path;

/// Run `<executable> [options...] <document>` with a compiler of `kind`
pub fn run_compiler(kind: CompilerKind, args: &[String]) -> Result<()> {
    let (executable, options, document) = match args {
        [executable, options @ .., document] => (executable, options, Path::new(document)),
        _ => bail!(
            "Usage: proceedings {} <executable> [additional options] <document>",
            kind.to_string().to_lowercase()
        ),
    };

    let mut compiler = Compiler::with_config(kind, CompilerConfig::with_executable(executable));
    compiler.set_options(options.iter().cloned());

    tracing::debug!(compiler = %compiler, document = %document.display(), "compiling");
    compiler.compile(document)?;

    if kind == CompilerKind::LaTeX {
        println!(
            "Requires recompile: {}",
            compiler.requires_recompile(document)
        );
    }
    Ok(())
}
