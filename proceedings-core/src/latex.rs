//! LaTeX log inspection.
//!
//! A LaTeX engine writes `<document>.log` next to the document. A zero exit
//! status is not trusted on its own: an `Emergency stop` line in the log
//! marks the run as failed. Rerun markers tell the caller another pass is
//! needed to settle citations and cross-references.

use crate::error::ExecutionFailure;
use crate::paths;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

static EMERGENCY_STOP_REGEX: OnceLock<Regex> = OnceLock::new();
static RERUN_REGEX: OnceLock<Regex> = OnceLock::new();

fn emergency_stop_regex() -> &'static Regex {
    EMERGENCY_STOP_REGEX
        .get_or_init(|| Regex::new(r"^.*Emergency stop.*$").expect("valid emergency stop regex"))
}

fn rerun_regex() -> &'static Regex {
    RERUN_REGEX.get_or_init(|| {
        Regex::new(
            r"^.*(Rerun to get citations correct|Rerun to get cross-references right).*$",
        )
        .expect("valid rerun regex")
    })
}

/// Log file the engine writes for `document`
pub fn log_path(document: &Path) -> PathBuf {
    paths::replace_extension(document, ".log")
}

/// Whether any line of the document's log matches `pattern`.
///
/// A missing log matches nothing. Unreadable logs are reported and treated
/// the same way.
pub fn log_matches(document: &Path, pattern: &Regex) -> bool {
    let log = log_path(document);
    let bytes = match std::fs::read(&log) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(log = %log.display(), "no log file");
            return false;
        }
        Err(e) => {
            warn!(log = %log.display(), error = %e, "Failed to check log");
            return false;
        }
    };

    String::from_utf8_lossy(&bytes)
        .lines()
        .any(|line| pattern.is_match(line))
}

/// Fails with [`ExecutionFailure::EmergencyStop`] if the log reports one
pub fn check_emergency_stop(document: &Path) -> Result<(), ExecutionFailure> {
    if log_matches(document, emergency_stop_regex()) {
        Err(ExecutionFailure::EmergencyStop)
    } else {
        Ok(())
    }
}

/// Whether the log asks for another pass to get citations or
/// cross-references right
pub fn requires_recompile(document: &Path) -> bool {
    log_matches(document, rerun_regex())
}
