//! List command implementation.

use anyhow::{Context, Result};
use proceedings_core::exchange;
use proceedings_core::{ParseMode, Project};
use std::path::Path;

pub fn list_project(config_path: &Path, json: bool) -> Result<()> {
    let project = Project::from_file(config_path, ParseMode::BestEffort)
        .with_context(|| format!("Failed to load project {:?}", config_path))?;

    if json {
        let value = serde_json::json!({
            "compilers": exchange::compilers_to_exchange(&project.compilers),
            "documents": exchange::documents_to_exchange(&project.documents),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Compilers:");
    if project.compilers.is_empty() {
        println!("  (none)");
    }
    for compiler in &project.compilers {
        println!("  {}", compiler);
    }

    println!("Documents:");
    if project.documents.is_empty() {
        println!("  (none)");
    }
    for document in &project.documents {
        println!("  {}", document);
    }

    Ok(())
}
