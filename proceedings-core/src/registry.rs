//! Ordered compiler and document lists.

use crate::compiler::Compiler;
use proceedings_types::DocumentRef;

/// Compilers in insertion order. Lookups by name return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerRegistry {
    compilers: Vec<Compiler>,
}

impl CompilerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, compiler: Compiler) {
        self.compilers.push(compiler);
    }

    /// First compiler registered under `name`
    pub fn find(&self, name: &str) -> Option<&Compiler> {
        self.compilers.iter().find(|c| c.name() == Some(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Compiler> {
        self.compilers.iter()
    }

    pub fn len(&self) -> usize {
        self.compilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilers.is_empty()
    }
}

impl FromIterator<Compiler> for CompilerRegistry {
    fn from_iter<I: IntoIterator<Item = Compiler>>(iter: I) -> Self {
        Self {
            compilers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompilerRegistry {
    type Item = &'a Compiler;
    type IntoIter = std::slice::Iter<'a, Compiler>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Documents in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRegistry {
    documents: Vec<DocumentRef>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, document: DocumentRef) {
        self.documents.push(document);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRef> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents whose compiler name is not in `compilers`
    pub fn unresolved<'a>(&'a self, compilers: &CompilerRegistry) -> Vec<&'a DocumentRef> {
        self.documents
            .iter()
            .filter(|doc| !compilers.contains(&doc.compiler))
            .collect()
    }
}

impl FromIterator<DocumentRef> for DocumentRegistry {
    fn from_iter<I: IntoIterator<Item = DocumentRef>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DocumentRegistry {
    type Item = &'a DocumentRef;
    type IntoIter = std::slice::Iter<'a, DocumentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
