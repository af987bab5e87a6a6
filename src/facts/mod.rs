// ABOUTME: Host fact collection for the grains binding
// ABOUTME: Describes the local machine (hostname, os, architecture, user, working directory)

pub mod error;

pub use error::{FactsError, Result};

use serde::Serialize;
use serde_json::Value;
use std::env;

#[derive(Debug, Clone, Serialize)]
pub struct HostFacts {
    pub id: String,
    pub host: String,
    pub os: String,
    pub kernel: String,
    pub cpuarch: String,
    pub username: String,
    pub cwd: String,
}

impl HostFacts {
    /// Collect facts about the current host
    pub fn collect() -> Result<Self> {
        let host = hostname::get()
            .map_err(FactsError::Hostname)?
            .to_string_lossy()
            .to_string();

        let username = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());

        let cwd = env::current_dir()?.display().to_string();

        Ok(Self {
            id: host.clone(),
            host,
            os: os_name(env::consts::OS).to_string(),
            kernel: env::consts::OS.to_string(),
            cpuarch: env::consts::ARCH.to_string(),
            username,
            cwd,
        })
    }

    /// Facts as a JSON object, with `overrides` merged over collected values.
    pub fn to_value(&self, overrides: &Value) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let (Value::Object(facts), Value::Object(extra)) = (&mut value, overrides) {
            facts.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(value)
    }
}

fn os_name(os: &str) -> &str {
    match os {
        "linux" => "Linux",
        "macos" => "MacOS",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}
