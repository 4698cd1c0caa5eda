use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn proceedings() -> Command {
    Command::cargo_bin("proceedings").expect("proceedings binary")
}

#[test]
fn latex_requires_executable_and_document() {
    proceedings()
        .args(["latex", "/usr/bin/pdflatex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: proceedings latex"));
}

#[test]
fn bibtex_without_arguments_prints_usage() {
    proceedings()
        .arg("bibtex")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: proceedings bibtex"));
}

#[test]
fn latex_reports_missing_executable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let exe = dir.path().join("pdflatex");
    let doc = dir.path().join("doc.tex");
    fs::write(&doc, "\\relax\n")?;

    proceedings()
        .arg("latex")
        .arg(&exe)
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "Executable does not exist: {}",
            exe.display()
        )));
    Ok(())
}

#[cfg(unix)]
#[test]
fn latex_runs_and_reports_recompile() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let exe = dir.path().join("pdflatex");
    fs::write(
        &exe,
        "#!/bin/sh\nfor last; do :; done\necho 'Rerun to get citations correct.' > \"${last%.*}.log\"\n",
    )?;
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755))?;
    let doc = dir.path().join("doc.tex");
    fs::write(&doc, "\\relax\n")?;

    proceedings()
        .arg("latex")
        .arg(&exe)
        .arg("-interaction=nonstopmode")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Requires recompile: true"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn bibtex_failure_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let exe = dir.path().join("bibtex");
    fs::write(&exe, "#!/bin/sh\nexit 2\n")?;
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755))?;
    let doc = dir.path().join("refs.tex");
    fs::write(&doc, "\\relax\n")?;

    proceedings()
        .arg("bibtex")
        .arg(&exe)
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to execute:"))
        .stderr(predicate::str::contains("refs.aux"))
        .stderr(predicate::str::contains("Process exited with: 2"));
    Ok(())
}

#[test]
fn example_prints_project_yaml() {
    proceedings()
        .arg("example")
        .assert()
        .success()
        .stdout(predicate::str::contains("class: proceedings.LaTeX"))
        .stdout(predicate::str::contains("executable: /usr/bin/bibtex"))
        .stdout(predicate::str::contains("documents:"));
}

#[test]
fn init_writes_loadable_project() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    proceedings()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("proceedings.yml"))?;
    assert!(written.contains("compilers:"));

    proceedings()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 compilers, 1 documents"));
    Ok(())
}

#[test]
fn list_json_outputs_exchange_mappings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("proceedings.yml"),
        r#"
compilers:
  - class: proceedings.LaTeX
    name: xelatex
    executable: /usr/bin/xelatex
documents:
  - compiler: xelatex
    file: thesis.tex
"#,
    )?;

    let assert = proceedings()
        .current_dir(dir.path())
        .args(["list", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["compilers"][0]["class"], "proceedings.LaTeX");
    assert_eq!(value["compilers"][0]["name"], "xelatex");
    assert_eq!(value["documents"][0]["file"], "thesis.tex");
    Ok(())
}

#[test]
fn list_prints_entries() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("custom.yml");
    fs::write(
        &config,
        "compilers:\n  - class: proceedings.BibTeX\n    name: bibtex\n    executable: /usr/bin/bibtex\n",
    )?;

    proceedings()
        .arg("list")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "bibtex (proceedings.BibTeX): /usr/bin/bibtex",
        ))
        .stdout(predicate::str::contains("(none)"));
    Ok(())
}

#[test]
fn check_flags_unknown_compilers() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("proceedings.yml"),
        r#"
compilers:
  - class: proceedings.LaTeX
    name: pdflatex
    executable: /usr/bin/pdflatex
documents:
  - compiler: lualatex
    file: slides.tex
"#,
    )?;

    proceedings()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown compiler for lualatex: slides.tex"));
    Ok(())
}

#[test]
fn check_strict_stops_at_invalid_entry() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("proceedings.yml"),
        "compilers:\n  - class: proceedings.LaTeX\n    name: pdflatex\n",
    )?;

    proceedings()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 invalid entries skipped"));

    proceedings()
        .current_dir(dir.path())
        .args(["check", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required key: executable"));
    Ok(())
}
