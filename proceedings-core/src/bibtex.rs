//! BibTeX target selection.
//!
//! BibTeX reads the `.aux` file the LaTeX pass produced, so whatever
//! document is given, the process is pointed at its `.aux` sibling.

use crate::paths;
use std::path::{Path, PathBuf};

/// The `.aux` file BibTeX is run on for `document`
pub fn aux_target(document: &Path) -> PathBuf {
    if paths::has_extension(document, ".aux") {
        document.to_path_buf()
    } else {
        paths::replace_extension(document, ".aux")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forces_aux_extension() {
        assert_eq!(aux_target(Path::new("refs.txt")), PathBuf::from("refs.aux"));
        assert_eq!(
            aux_target(Path::new("/tmp/paper/main.tex")),
            PathBuf::from("/tmp/paper/main.aux")
        );
        assert_eq!(aux_target(Path::new("main")), PathBuf::from("main.aux"));
    }

    #[test]
    fn test_keeps_existing_aux() {
        assert_eq!(aux_target(Path::new("main.aux")), PathBuf::from("main.aux"));
        assert_eq!(aux_target(Path::new("MAIN.AUX")), PathBuf::from("MAIN.AUX"));
    }
}
