// ABOUTME: Public render entry point for state scripts
// ABOUTME: Locates the template, builds its execution context, runs the executor and validates the envelope

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::context::{Binding, ContextBuilder};
use super::error::{Result, TemplateError, DEFAULT_RENDER_ERROR};
use super::locator::locate;
use crate::functions::FunctionRegistry;
use crate::script::{RhaiScriptExecutor, ScriptExecutor};

/// Identifier → declaration mapping produced by a successful render.
///
/// Its shape is not checked here; downstream consumers validate it.
pub type ConfigurationTree = Value;

/// Per-render settings: environment id, script id and extra bindings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub saltenv: String,
    pub sls: String,
    pub context: BTreeMap<String, Binding>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            saltenv: "base".to_string(),
            sls: String::new(),
            context: BTreeMap::new(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saltenv(mut self, saltenv: impl Into<String>) -> Self {
        self.saltenv = saltenv.into();
        self
    }

    pub fn with_sls(mut self, sls: impl Into<String>) -> Self {
        self.sls = sls.into();
        self
    }

    /// Add an extra binding; it replaces any built-in binding of the same name
    pub fn with_context(mut self, name: impl Into<String>, value: impl Into<Binding>) -> Self {
        self.context.insert(name.into(), value.into());
        self
    }
}

/// Renders state scripts into configuration trees.
///
/// The function registry, grains, pillar and opts are shared by every render;
/// each call still gets its own [`ExecutionContext`](super::ExecutionContext).
pub struct Renderer<E> {
    executor: E,
    functions: Arc<FunctionRegistry>,
    grains: Arc<Value>,
    pillar: Arc<Value>,
    opts: Arc<Value>,
}

impl<E: ScriptExecutor> Renderer<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            functions: Arc::new(FunctionRegistry::new()),
            grains: Arc::new(json!({})),
            pillar: Arc::new(json!({})),
            opts: Arc::new(json!({})),
        }
    }

    pub fn with_functions(mut self, functions: Arc<FunctionRegistry>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_grains(mut self, grains: impl Into<Arc<Value>>) -> Self {
        self.grains = grains.into();
        self
    }

    pub fn with_pillar(mut self, pillar: impl Into<Arc<Value>>) -> Self {
        self.pillar = pillar.into();
        self
    }

    pub fn with_opts(mut self, opts: impl Into<Arc<Value>>) -> Self {
        self.opts = opts.into();
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn functions(&self) -> &Arc<FunctionRegistry> {
        &self.functions
    }

    /// Context builder preloaded with this renderer's shared bindings
    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::new(
            Arc::clone(&self.functions),
            Arc::clone(&self.grains),
            Arc::clone(&self.pillar),
            Arc::clone(&self.opts),
        )
    }

    /// Render the script at `path`.
    ///
    /// Fails with `TemplateNotFound` before anything executes when `path` is
    /// not a regular file, and with `RenderError` when the executor reports
    /// failure. On success the executor's data is returned as is.
    #[instrument(skip_all, fields(saltenv = %options.saltenv, sls = %options.sls))]
    pub fn render(
        &self,
        path: impl AsRef<Path>,
        options: &RenderOptions,
    ) -> Result<ConfigurationTree> {
        let template = locate(path.as_ref())?;
        info!("Rendering {}", template.display());

        let context = self
            .context_builder()
            .saltenv(options.saltenv.as_str())
            .sls(options.sls.as_str())
            .with_overrides(options.context.clone())
            .build();
        debug!("Execution context bindings: {:?}", context.names());

        let envelope = self.executor.execute(&template, &context);

        if !envelope.is_success() {
            let message = envelope
                .diagnostic()
                .unwrap_or_else(|| DEFAULT_RENDER_ERROR.to_string());
            return Err(TemplateError::RenderError(message));
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }

    /// Render with the default environment, no script id and no extra bindings
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<ConfigurationTree> {
        self.render(path, &RenderOptions::default())
    }
}

impl Default for Renderer<RhaiScriptExecutor> {
    fn default() -> Self {
        Self::new(RhaiScriptExecutor::new())
    }
}
