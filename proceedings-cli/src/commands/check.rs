//! Check command implementation.

use anyhow::{bail, Context, Result};
use proceedings_core::{ParseMode, Project};
use serde_json::json;
use std::path::Path;

/// Validate a project file: every entry restores and every document names
/// a configured compiler
pub fn check_project(config_path: &Path, strict: bool, json: bool) -> Result<()> {
    let mode = if strict {
        ParseMode::FailFast
    } else {
        ParseMode::BestEffort
    };
    let project = Project::from_file(config_path, mode)
        .with_context(|| format!("Failed to load project {:?}", config_path))?;

    let unresolved = project.unresolved_documents();
    let skipped = project.skipped_entries();

    if json {
        let unresolved_json: Vec<_> = unresolved
            .iter()
            .map(|doc| {
                json!({
                    "compiler": doc.compiler,
                    "file": doc.file.to_string_lossy(),
                })
            })
            .collect();
        let report = json!({
            "compilers": project.compilers.len(),
            "documents": project.documents.len(),
            "skipped_entries": skipped,
            "unresolved": unresolved_json,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} compilers, {} documents",
            project.compilers.len(),
            project.documents.len()
        );
        for doc in &unresolved {
            println!("  unknown compiler for {}", doc);
        }
        if skipped > 0 {
            println!("  {} invalid entries skipped", skipped);
        }
    }

    if skipped > 0 || !unresolved.is_empty() {
        bail!(
            "{} invalid entries, {} documents with unknown compilers",
            skipped,
            unresolved.len()
        );
    }
    Ok(())
}
