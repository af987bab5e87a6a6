// ABOUTME: Command implementations for the slsrender CLI
// ABOUTME: Handles the render, grains and functions commands

use anyhow::Result;
use serde_json::{Map, Value};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use super::args::Args;
use super::config::Config;
use crate::facts::HostFacts;
use crate::functions::FunctionRegistry;
use crate::output::{write_output, OutputFormat};
use crate::render::{Binding, RenderOptions, Renderer};

/// Arguments of the `render` command
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub template: PathBuf,
    pub saltenv: Option<String>,
    pub sls: Option<String>,
    pub context: Vec<String>,
    pub pillar: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Render a state script and write its configuration tree
pub fn render_template(args: RenderArgs, config: &Config) -> Result<()> {
    let RenderArgs {
        template,
        saltenv,
        sls,
        context,
        pillar: pillar_file,
        format,
        output,
    } = args;

    let context = Args::parse_context(&context)?;
    info!("Parsed {} context bindings", context.len());

    let mut pillar = config.pillar.clone();
    if let Some(path) = pillar_file {
        pillar.extend(load_pillar_file(&path)?);
    }

    let renderer = Renderer::default()
        .with_grains(collect_grains(config)?)
        .with_pillar(Value::Object(pillar))
        .with_opts(config.to_opts()?);

    let sls = sls
        .or_else(|| {
            config
                .file_root
                .as_deref()
                .and_then(|root| sls_from_path(root, &template))
        })
        .unwrap_or_default();
    debug!("Script id: '{}'", sls);

    let mut options = RenderOptions::new()
        .with_saltenv(saltenv.unwrap_or_else(|| config.saltenv.clone()))
        .with_sls(sls);
    for (name, value) in context {
        options = options.with_context(name, binding_for(value));
    }

    let tree = renderer
        .render(&template, &options)
        .map_err(|e| anyhow::anyhow!("Failed to render {}: {}", template.display(), e))?;

    write_output(&tree, format, output.as_deref())?;
    Ok(())
}

/// Print the grains a script would see
pub fn show_grains(format: OutputFormat, config: &Config) -> Result<()> {
    let grains = collect_grains(config)?;
    write_output(&grains, format, None)?;
    Ok(())
}

/// List the available execution functions
pub fn list_functions() -> Result<()> {
    let registry = FunctionRegistry::new();
    for name in registry.list_functions() {
        println!("{}", name);
    }
    Ok(())
}

fn collect_grains(config: &Config) -> Result<Value> {
    let facts = HostFacts::collect()
        .map_err(|e| anyhow::anyhow!("Failed to collect grains: {}", e))?;
    Ok(facts.to_value(&Value::Object(config.grains.clone()))?)
}

fn load_pillar_file(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read pillar file '{}': {}", path.display(), e))?;
    let pillar: Map<String, Value> = serde_yaml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Invalid pillar file '{}': {}", path.display(), e))?;
    Ok(pillar)
}

fn binding_for(value: Value) -> Binding {
    match value {
        Value::String(text) => Binding::Text(text),
        other => Binding::from(other),
    }
}

/// Derive the dotted script id of `template` relative to `root`.
///
/// `root/foo/bar/baz.rhai` becomes `foo.bar.baz`; an `init` file names its
/// directory, so `root/foo/init.rhai` becomes `foo`.
pub fn sls_from_path(root: &Path, template: &Path) -> Option<String> {
    let relative = template.strip_prefix(root).ok()?.with_extension("");

    let mut parts: Vec<String> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Option<_>>()?;

    if parts.len() > 1 && parts.last().map(String::as_str) == Some("init") {
        parts.pop();
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}
