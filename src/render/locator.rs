// ABOUTME: Template locator gating every render on an existing regular file
// ABOUTME: Runs before any execution context is built or any script code executes

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{Result, TemplateError};

/// Confirm `path` names an existing regular file.
pub fn locate(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        debug!("Located template: {}", path.display());
        Ok(path.to_path_buf())
    } else {
        Err(TemplateError::not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_locate_existing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("top.rhai");
        std::fs::write(&file, "fn run() { #{} }").unwrap();

        assert_eq!(locate(&file).unwrap(), file);
    }

    #[test]
    fn test_locate_missing_file() {
        let err = locate(Path::new("/srv/salt/missing.rhai")).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/srv/salt/missing.rhai"));
    }

    #[test]
    fn test_locate_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = locate(dir.path()).unwrap_err();
        assert_eq!(err, TemplateError::not_found(dir.path()));
    }
}
