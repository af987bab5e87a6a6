// ABOUTME: Output formatters for rendered configuration trees
// ABOUTME: Serializes trees and fact maps as YAML or pretty-printed JSON

use clap::ValueEnum;
use serde::Serialize;

use super::error::{OutputError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Yaml => {
                serde_yaml::to_string(value).map_err(OutputError::YamlSerializationError)
            }
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(value).map_err(OutputError::SerializationError)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_format() {
        let tree = json!({"common_packages": {"pkg.installed": [{"pkgs": ["curl", "vim"]}]}});
        let yaml = OutputFormat::Yaml.format(&tree).unwrap();

        assert!(yaml.contains("common_packages:"));
        assert!(yaml.contains("pkg.installed:"));
        assert!(yaml.contains("- curl"));
    }

    #[test]
    fn test_json_format() {
        let tree = json!({"s3cmd": {"pkg": ["installed", {"name": "s3cmd"}]}});
        let text = OutputFormat::Json.format(&tree).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, tree);
        assert!(text.ends_with('\n'));
    }
}
