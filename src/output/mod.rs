// ABOUTME: Output handling for rendered configuration trees
// ABOUTME: Formats results as YAML or JSON and writes them to stdout or a file

pub mod error;
pub mod formatter;

pub use error::{OutputError, Result};
pub use formatter::OutputFormat;

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Format `value` and write it to `destination`, or stdout when absent
pub fn write_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    destination: Option<&Path>,
) -> Result<()> {
    let content = format.format(value)?;

    match destination {
        Some(path) => {
            std::fs::write(path, content)?;
            info!("Output written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_write_output_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("highstate.json");
        let tree = json!({"vim": {"pkg.installed": []}});

        write_output(&tree, OutputFormat::Json, Some(&path)).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, tree);
    }
}
