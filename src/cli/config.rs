// ABOUTME: Configuration management for the slsrender application
// ABOUTME: Loads renderer settings from YAML files and merges environment variable overrides

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_saltenv")]
    pub saltenv: String,

    /// Root directory templates are resolved against when deriving script ids
    #[serde(default)]
    pub file_root: Option<PathBuf>,

    /// Grains that replace or extend the collected host facts
    #[serde(default)]
    pub grains: Map<String, Value>,

    #[serde(default)]
    pub pillar: Map<String, Value>,

    /// Additional options exposed to scripts alongside the settings above
    #[serde(default)]
    pub opts: Map<String, Value>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_saltenv() -> String {
    "base".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            saltenv: default_saltenv(),
            file_root: None,
            grains: Map::new(),
            pillar: Map::new(),
            opts: Map::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("slsrender.yaml"),
            PathBuf::from("slsrender.yml"),
            PathBuf::from(".slsrender.yaml"),
            PathBuf::from(".slsrender.yml"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".slsrender").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("slsrender.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) -> Result<()> {
        if let Ok(saltenv) = std::env::var("SLSRENDER_SALTENV") {
            self.saltenv = saltenv;
        }
        if let Ok(file_root) = std::env::var("SLSRENDER_FILE_ROOT") {
            self.file_root = Some(PathBuf::from(file_root));
        }
        if let Ok(level) = std::env::var("SLSRENDER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SLSRENDER_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Options mapping handed to scripts as `opts`
    pub fn to_opts(&self) -> Result<Value> {
        let mut opts = Map::new();
        opts.insert("saltenv".to_string(), Value::String(self.saltenv.clone()));
        opts.insert(
            "file_root".to_string(),
            self.file_root
                .as_ref()
                .map(|p| Value::String(p.display().to_string()))
                .unwrap_or(Value::Null),
        );
        opts.insert("logging".to_string(), serde_json::to_value(&self.logging)?);
        opts.extend(self.opts.clone());
        Ok(Value::Object(opts))
    }
}
