//! Project file: the compilers and documents persisted as YAML.
//!
//! ```yaml
//! compilers:
//!   - class: proceedings.LaTeX
//!     name: pdflatex
//!     executable: /usr/bin/pdflatex
//! documents:
//!   - compiler: pdflatex
//!     file: paper/main.tex
//! ```

use crate::compiler::Compiler;
use crate::error::{ExchangeError, ProjectError};
use crate::exchange::{self, ParseMode};
use crate::registry::{CompilerRegistry, DocumentRegistry};
use proceedings_types::DocumentRef;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const KEY_COMPILERS: &str = "compilers";
pub const KEY_DOCUMENTS: &str = "documents";

/// Default file name of a project
pub const DEFAULT_PROJECT_FILE: &str = "proceedings.yml";

#[derive(Debug, Clone, Default)]
pub struct Project {
    pub compilers: CompilerRegistry,
    pub documents: DocumentRegistry,

    // Entries dropped while loading in best-effort mode
    skipped_entries: usize,

    // Internal: path to the project file (for relative path resolution)
    project_path: Option<PathBuf>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// A LaTeX engine and BibTeX at their usual system locations, and one
    /// document compiled with the engine
    pub fn example() -> Self {
        let mut project = Self::new();
        let mut latex = Compiler::latex("/usr/bin/pdflatex");
        latex.set_options(["-interaction=nonstopmode"]);
        project.compilers.push(latex);
        project.compilers.push(Compiler::bibtex("/usr/bin/bibtex"));
        project
            .documents
            .push(DocumentRef::new("pdflatex", "paper/main.tex"));
        project
    }

    /// Load a project from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P, mode: ParseMode) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut project = Self::from_yaml_str(&contents, mode)?;

        project.project_path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            compilers = project.compilers.len(),
            documents = project.documents.len(),
            "loaded project"
        );

        Ok(project)
    }

    /// Parse a project from YAML.
    ///
    /// Absent sections are empty. In [`ParseMode::BestEffort`] entries that
    /// cannot be restored are skipped and counted in
    /// [`Project::skipped_entries`].
    pub fn from_yaml_str(contents: &str, mode: ParseMode) -> Result<Self, ProjectError> {
        let root: Value = serde_yaml::from_str(contents)?;
        let root = match root {
            Value::Null => Mapping::new(),
            Value::Mapping(map) => map,
            other => {
                return Err(ProjectError::InvalidLayout(format!(
                    "expected a mapping at the top level, found {:?}",
                    other
                )))
            }
        };

        let compilers = exchange::compilers_from_exchange(section(&root, KEY_COMPILERS)?, mode)
            .map_err(|source| exchange_error(KEY_COMPILERS, source))?;
        let documents = exchange::documents_from_exchange(section(&root, KEY_DOCUMENTS)?, mode)
            .map_err(|source| exchange_error(KEY_DOCUMENTS, source))?;

        let skipped_entries = compilers.iter().filter(|c| c.is_none()).count()
            + documents.iter().filter(|d| d.is_none()).count();
        if skipped_entries > 0 {
            warn!(skipped_entries, "skipped invalid project entries");
        }

        Ok(Self {
            compilers: compilers.into_iter().flatten().collect(),
            documents: documents.into_iter().flatten().collect(),
            skipped_entries,
            project_path: None,
        })
    }

    pub fn to_yaml_string(&self) -> Result<String, ProjectError> {
        let mut root = Mapping::new();
        root.insert(
            KEY_COMPILERS.into(),
            sequence(exchange::compilers_to_exchange(&self.compilers)),
        );
        root.insert(
            KEY_DOCUMENTS.into(),
            sequence(exchange::documents_to_exchange(&self.documents)),
        );
        Ok(serde_yaml::to_string(&Value::Mapping(root))?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ProjectError> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    pub fn skipped_entries(&self) -> usize {
        self.skipped_entries
    }

    /// Path of the file this project was loaded from
    pub fn path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    /// Compiler a document is configured to use
    pub fn compiler_for(&self, document: &DocumentRef) -> Option<&Compiler> {
        self.compilers.find(&document.compiler)
    }

    /// Documents referring to a compiler name that is not configured
    pub fn unresolved_documents(&self) -> Vec<&DocumentRef> {
        self.documents.unresolved(&self.compilers)
    }

    /// Resolve a path relative to the project file location
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.project_path.as_deref().and_then(Path::parent) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

fn section<'a>(root: &'a Mapping, key: &'static str) -> Result<&'a [Value], ProjectError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Sequence(items)) => Ok(items.as_slice()),
        Some(other) => Err(ProjectError::InvalidLayout(format!(
            "{} must be a sequence, found {:?}",
            key, other
        ))),
    }
}

fn sequence(maps: Vec<Mapping>) -> Value {
    Value::Sequence(maps.into_iter().map(Value::Mapping).collect())
}

fn exchange_error(section: &'static str, source: ExchangeError) -> ProjectError {
    ProjectError::Exchange { section, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompilerKind;
    use tempfile::tempdir;

    const PROJECT: &str = r#"
compilers:
  - class: proceedings.LaTeX
    name: pdflatex
    executable: /usr/bin/pdflatex
    options:
      - -interaction=nonstopmode
  - class: proceedings.BibTeX
    name: bibtex
    executable: /usr/bin/bibtex
documents:
  - compiler: pdflatex
    file: paper/main.tex
  - compiler: bibtex
    file: paper/main.aux
"#;

    #[test]
    fn test_parse_project() {
        let project = Project::from_yaml_str(PROJECT, ParseMode::FailFast).unwrap();
        assert_eq!(project.compilers.len(), 2);
        assert_eq!(project.documents.len(), 2);
        assert_eq!(project.skipped_entries(), 0);

        let latex = project.compilers.find("pdflatex").unwrap();
        assert_eq!(latex.kind(), CompilerKind::LaTeX);
        assert_eq!(latex.options(), ["-interaction=nonstopmode"]);
        assert!(project.unresolved_documents().is_empty());
    }

    #[test]
    fn test_empty_project() {
        let project = Project::from_yaml_str("", ParseMode::FailFast).unwrap();
        assert!(project.compilers.is_empty());
        assert!(project.documents.is_empty());

        let project = Project::from_yaml_str("documents: []\n", ParseMode::FailFast).unwrap();
        assert!(project.documents.is_empty());
    }

    #[test]
    fn test_invalid_layout() {
        let err = Project::from_yaml_str("- a\n- b\n", ParseMode::BestEffort).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidLayout(_)));

        let err = Project::from_yaml_str("compilers: pdflatex\n", ParseMode::BestEffort)
            .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidLayout(_)));
    }

    #[test]
    fn test_best_effort_skips_invalid_entries() {
        let yaml = r#"
compilers:
  - class: proceedings.Unknown
    name: x
    executable: /usr/bin/x
  - class: proceedings.LaTeX
    name: pdflatex
    executable: /usr/bin/pdflatex
documents:
  - file: orphan.tex
"#;
        let project = Project::from_yaml_str(yaml, ParseMode::BestEffort).unwrap();
        assert_eq!(project.compilers.len(), 1);
        assert!(project.documents.is_empty());
        assert_eq!(project.skipped_entries(), 2);

        let err = Project::from_yaml_str(yaml, ParseMode::FailFast).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Exchange {
                section: KEY_COMPILERS,
                ..
            }
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_PROJECT_FILE);

        let project = Project::example();
        project.save(&path).unwrap();

        let reloaded = Project::from_file(&path, ParseMode::FailFast).unwrap();
        assert_eq!(reloaded.compilers, project.compilers);
        assert_eq!(reloaded.documents, project.documents);
        assert_eq!(reloaded.path(), Some(path.as_path()));
    }

    #[test]
    fn test_resolve_relative_to_project_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_PROJECT_FILE);
        std::fs::write(&path, PROJECT).unwrap();

        let project = Project::from_file(&path, ParseMode::FailFast).unwrap();
        let doc = project.documents.iter().next().unwrap();
        assert_eq!(project.resolve(&doc.file), dir.path().join("paper/main.tex"));
        assert_eq!(
            project.resolve(Path::new("/abs/main.tex")),
            PathBuf::from("/abs/main.tex")
        );
        assert_eq!(
            project.compiler_for(doc).and_then(Compiler::name),
            Some("pdflatex")
        );
    }

    #[test]
    fn test_unresolved_documents() {
        let mut project = Project::example();
        project
            .documents
            .push(DocumentRef::new("lualatex", "slides.tex"));

        let unresolved = project.unresolved_documents();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].compiler, "lualatex");
    }
}
