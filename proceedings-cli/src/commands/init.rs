//! Init command implementation.

use anyhow::{Context, Result};
use proceedings_core::project::DEFAULT_PROJECT_FILE;
use proceedings_core::Project;
use std::fs;
use std::path::Path;

/// Write an example project file unless one exists
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    let config_path = root.join(DEFAULT_PROJECT_FILE);
    if config_path.exists() {
        println!("{} already exists at {:?}", DEFAULT_PROJECT_FILE, config_path);
        return Ok(());
    }

    Project::example()
        .save(&config_path)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    println!("  - Point the compiler executables at your TeX installation");
    println!("  - List your documents under `documents`");
    Ok(())
}

/// Print the example project file to stdout
pub fn print_example() -> Result<()> {
    let yaml = Project::example()
        .to_yaml_string()
        .context("Failed to render example project")?;
    print!("{}", yaml);
    Ok(())
}
