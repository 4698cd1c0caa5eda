//! Conversion of compilers and documents to and from the exchange format.
//!
//! Compilers are stored as `{class, name, executable, options}` mappings,
//! documents as `{compiler, file}` mappings. Single entries that cannot be
//! restored come back as `None`; collections either keep a `None` hole at
//! the failed position or stop at the first failure, see [`ParseMode`].

use crate::compiler::{Compiler, CompilerKind};
use crate::error::ExchangeError;
use crate::registry::{CompilerRegistry, DocumentRegistry};
use proceedings_types::DocumentRef;
use serde_yaml::{Mapping, Value};
use tracing::warn;

pub const KEY_CLASS: &str = "class";
pub const KEY_NAME: &str = "name";
pub const KEY_EXECUTABLE: &str = "executable";
pub const KEY_OPTIONS: &str = "options";
pub const KEY_COMPILER: &str = "compiler";
pub const KEY_FILE: &str = "file";

/// What a collection parse does with an entry it cannot restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Keep going; the entry becomes `None` at its position
    #[default]
    BestEffort,
    /// Stop and report the index of the entry
    FailFast,
}

pub fn compiler_to_exchange(compiler: &Compiler) -> Mapping {
    let mut map = Mapping::new();
    map.insert(KEY_CLASS.into(), compiler.kind().tag().into());
    map.insert(
        KEY_NAME.into(),
        compiler.name().map(Value::from).unwrap_or(Value::Null),
    );
    map.insert(
        KEY_EXECUTABLE.into(),
        compiler
            .executable()
            .map(|p| Value::from(p.to_string_lossy().into_owned()))
            .unwrap_or(Value::Null),
    );
    if !compiler.options().is_empty() {
        map.insert(
            KEY_OPTIONS.into(),
            Value::Sequence(compiler.options().iter().map(|o| o.as_str().into()).collect()),
        );
    }
    map
}

/// Restore a compiler, reporting why it could not be restored.
///
/// `class`, `name` and `executable` must all be present. The executable is
/// applied first, then the stored name replaces the derived one. A `null`
/// name or executable leaves that field unset.
pub fn try_compiler_from_exchange(map: &Mapping) -> Result<Compiler, ExchangeError> {
    let class = required(map, KEY_CLASS)?;
    let name = required(map, KEY_NAME)?;
    let executable = required(map, KEY_EXECUTABLE)?;

    let class = as_str(KEY_CLASS, class)?
        .ok_or(ExchangeError::InvalidValue {
            key: KEY_CLASS,
            reason: "null".into(),
        })?;
    let kind =
        CompilerKind::from_tag(class).ok_or_else(|| ExchangeError::UnknownClass(class.into()))?;

    let mut compiler = Compiler::new(kind);
    if let Some(executable) = as_str(KEY_EXECUTABLE, executable)? {
        compiler.set_executable(executable);
    }
    if let Some(name) = as_str(KEY_NAME, name)? {
        compiler.set_name(name);
    }
    if let Some(options) = map.get(KEY_OPTIONS) {
        compiler.set_options(as_options(options)?);
    }

    Ok(compiler)
}

/// Restore a compiler, or `None` if the mapping does not describe one
pub fn compiler_from_exchange(map: &Mapping) -> Option<Compiler> {
    try_compiler_from_exchange(map)
        .map_err(|e| warn!(error = %e, "cannot restore compiler"))
        .ok()
}

pub fn document_to_exchange(document: &DocumentRef) -> Mapping {
    let mut map = Mapping::new();
    map.insert(KEY_COMPILER.into(), document.compiler.as_str().into());
    map.insert(
        KEY_FILE.into(),
        document.file.to_string_lossy().into_owned().into(),
    );
    map
}

pub fn try_document_from_exchange(map: &Mapping) -> Result<DocumentRef, ExchangeError> {
    required(map, KEY_COMPILER)?;
    required(map, KEY_FILE)?;

    serde_yaml::from_value(Value::Mapping(map.clone())).map_err(|e| ExchangeError::InvalidValue {
        key: "document",
        reason: e.to_string(),
    })
}

/// Restore a document, or `None` if `compiler` or `file` is missing
pub fn document_from_exchange(map: &Mapping) -> Option<DocumentRef> {
    try_document_from_exchange(map)
        .map_err(|e| warn!(error = %e, "cannot restore document"))
        .ok()
}

pub fn compilers_to_exchange(compilers: &CompilerRegistry) -> Vec<Mapping> {
    compilers.iter().map(compiler_to_exchange).collect()
}

pub fn documents_to_exchange(documents: &DocumentRegistry) -> Vec<Mapping> {
    documents.iter().map(document_to_exchange).collect()
}

/// Restore compilers in order; see [`ParseMode`] for failed entries.
pub fn compilers_from_exchange(
    values: &[Value],
    mode: ParseMode,
) -> Result<Vec<Option<Compiler>>, ExchangeError> {
    restore_all(values, mode, try_compiler_from_exchange)
}

/// Restore documents in order; see [`ParseMode`] for failed entries.
pub fn documents_from_exchange(
    values: &[Value],
    mode: ParseMode,
) -> Result<Vec<Option<DocumentRef>>, ExchangeError> {
    restore_all(values, mode, try_document_from_exchange)
}

fn restore_all<T>(
    values: &[Value],
    mode: ParseMode,
    restore: impl Fn(&Mapping) -> Result<T, ExchangeError>,
) -> Result<Vec<Option<T>>, ExchangeError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let restored = match value.as_mapping() {
                Some(map) => restore(map),
                None => Err(ExchangeError::NotAMapping),
            };
            match (restored, mode) {
                (Ok(item), _) => Ok(Some(item)),
                (Err(e), ParseMode::BestEffort) => {
                    warn!(index, error = %e, "invalid entry");
                    Ok(None)
                }
                (Err(e), ParseMode::FailFast) => Err(ExchangeError::Element {
                    index,
                    source: Box::new(e),
                }),
            }
        })
        .collect()
}

fn required<'a>(map: &'a Mapping, key: &'static str) -> Result<&'a Value, ExchangeError> {
    map.get(key).ok_or(ExchangeError::MissingKey(key))
}

fn as_str<'a>(key: &'static str, value: &'a Value) -> Result<Option<&'a str>, ExchangeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(ExchangeError::InvalidValue {
            key,
            reason: format!("expected a string, found {:?}", other),
        }),
    }
}

fn as_options(value: &Value) -> Result<Vec<String>, ExchangeError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                as_str(KEY_OPTIONS, item)?
                    .map(str::to_string)
                    .ok_or(ExchangeError::InvalidValue {
                        key: KEY_OPTIONS,
                        reason: "null option".into(),
                    })
            })
            .collect(),
        other => Err(ExchangeError::InvalidValue {
            key: KEY_OPTIONS,
            reason: format!("expected a sequence, found {:?}", other),
        }),
    }
}
