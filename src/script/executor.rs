// ABOUTME: Script executors turning a script file plus execution context into a result envelope
// ABOUTME: Provides the executor trait and the Rhai implementation calling the script's run() entry point

use rhai::{Dynamic, Scope, AST};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use super::engine::{build_engine, ScriptFunctions};
use crate::render::{Binding, ExecutionContext, ResultEnvelope};

/// Name of the zero-argument function every state script must define.
pub const ENTRY_POINT: &str = "run";

/// Executes a script with a given context.
///
/// Implementations report every failure through the envelope rather than
/// returning errors; the renderer decides how to surface them.
pub trait ScriptExecutor: Send + Sync {
    fn execute(&self, path: &Path, context: &ExecutionContext) -> ResultEnvelope;
}

/// Runs Rhai state scripts.
///
/// Context bindings are resolved by name whenever the script reads a
/// variable that is not defined locally, so they are visible inside `run()`
/// as well as at the top level. No operation or time limits are applied.
#[derive(Debug, Clone, Default)]
pub struct RhaiScriptExecutor;

impl RhaiScriptExecutor {
    pub fn new() -> Self {
        Self
    }

    fn try_execute(
        &self,
        path: &Path,
        context: &ExecutionContext,
    ) -> std::result::Result<Value, String> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let mut engine = build_engine();
        let mut ast = engine
            .compile(&source)
            .map_err(|e| format!("Parse error in {}: {}", path.display(), e))?;
        ast.set_source(path.display().to_string());

        if !has_entry_point(&ast) {
            return Err(format!(
                "{} does not define a zero-argument {}() function",
                path.display(),
                ENTRY_POINT
            ));
        }

        let bindings = script_bindings(context)?;
        engine.on_var(move |name, _index, ctx| {
            // Script locals shadow context bindings
            if ctx.scope().contains(name) {
                return Ok(None);
            }
            Ok(bindings.get(name).cloned())
        });

        let mut scope = Scope::new();
        let result = engine
            .call_fn::<Dynamic>(&mut scope, &ast, ENTRY_POINT, ())
            .map_err(|e| e.to_string())?;

        rhai::serde::from_dynamic::<Value>(&result).map_err(|e| {
            format!(
                "{}() in {} returned a value that cannot be represented as data: {}",
                ENTRY_POINT,
                path.display(),
                e
            )
        })
    }
}

impl ScriptExecutor for RhaiScriptExecutor {
    fn execute(&self, path: &Path, context: &ExecutionContext) -> ResultEnvelope {
        debug!("Executing {} with {} bindings", path.display(), context.len());

        match self.try_execute(path, context) {
            Ok(data) => ResultEnvelope::success(data),
            Err(message) => {
                warn!("Script execution failed: {}", message);
                ResultEnvelope::failure(message)
            }
        }
    }
}

fn has_entry_point(ast: &AST) -> bool {
    ast.iter_functions()
        .any(|f| f.name == ENTRY_POINT && f.params.is_empty())
}

fn script_bindings(
    context: &ExecutionContext,
) -> std::result::Result<HashMap<String, Dynamic>, String> {
    context
        .iter()
        .map(|(name, binding)| -> std::result::Result<(String, Dynamic), String> {
            let value = match binding {
                Binding::Functions(functions) => {
                    Dynamic::from(ScriptFunctions(functions.clone()))
                }
                Binding::Data(data) => rhai::serde::to_dynamic(&**data)
                    .map_err(|e| format!("Failed to bind {}: {}", name, e))?,
                Binding::Text(text) => Dynamic::from(text.clone()),
            };
            Ok((name.to_string(), value))
        })
        .collect()
}
