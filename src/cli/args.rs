// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for slsrender

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "slsrender")]
#[command(about = "Render Rhai state scripts into configuration trees")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a state script and print the resulting configuration tree
    Render {
        #[arg(help = "Path to the state script")]
        template: PathBuf,

        #[arg(long, help = "Environment the script is rendered for")]
        saltenv: Option<String>,

        #[arg(long, help = "Script id (derived from file_root when omitted)")]
        sls: Option<String>,

        #[arg(
            short = 'C',
            long = "context",
            help = "Extra script binding (key=value, value parsed as YAML)"
        )]
        context: Vec<String>,

        #[arg(long, help = "YAML file merged over the configured pillar")]
        pillar: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        #[arg(short, long, help = "Write the tree to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Show the grains scripts will see
    Grains {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// List the execution functions available through `salt`
    Functions,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse extra bindings from key=value format
    pub fn parse_context(vars: &[String]) -> anyhow::Result<BTreeMap<String, Value>> {
        let mut context = BTreeMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                context.insert(key.to_string(), parse_value(value));
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid context format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(context)
    }
}

fn parse_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
