// ABOUTME: Rhai engine construction for state script execution
// ABOUTME: Registers the function registry type and routes script output to tracing

use rhai::{Array, Dynamic, Engine, EvalAltResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::functions::FunctionRegistry;

/// Script-side handle on the shared function registry.
#[derive(Clone)]
pub(crate) struct ScriptFunctions(pub(crate) Arc<FunctionRegistry>);

pub(crate) fn build_engine() -> Engine {
    let mut engine = Engine::new();

    // State scripts run unbounded; zero means unlimited for every setting
    // except call levels, which has no unlimited value.
    engine.set_max_operations(0);
    engine.set_max_call_levels(usize::MAX);
    engine.set_max_expr_depths(0, 0);
    engine.set_max_string_size(0);
    engine.set_max_array_size(0);
    engine.set_max_map_size(0);

    engine
        .register_type_with_name::<ScriptFunctions>("FunctionRegistry")
        .register_fn("invoke", |functions: ScriptFunctions, name: &str| {
            call_function(functions, name, Array::new())
        })
        .register_fn("invoke", call_function)
        .register_fn("has", |functions: ScriptFunctions, name: &str| {
            functions.0.contains(name)
        })
        .register_fn("list", |functions: ScriptFunctions| -> Array {
            functions
                .0
                .list_functions()
                .into_iter()
                .map(|name| Dynamic::from(name.to_string()))
                .collect()
        });

    engine.on_print(|text| info!(target: "slsrender::script", "{}", text));
    engine.on_debug(|text, source, pos| {
        debug!(
            target: "slsrender::script",
            "{} ({}:{})",
            text,
            source.unwrap_or("<script>"),
            pos.line().unwrap_or(0)
        )
    });

    engine
}

fn call_function(
    functions: ScriptFunctions,
    name: &str,
    args: Array,
) -> Result<Dynamic, Box<EvalAltResult>> {
    let args = args
        .iter()
        .map(|arg| rhai::serde::from_dynamic::<Value>(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let value = functions.0.call(name, &args).map_err(|e| e.to_string())?;
    rhai::serde::to_dynamic(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhai::Scope;

    fn engine_with_registry() -> (Engine, Scope<'static>) {
        let engine = build_engine();
        let mut scope = Scope::new();
        scope.push(
            "salt",
            ScriptFunctions(Arc::new(FunctionRegistry::new())),
        );
        (engine, scope)
    }

    #[test]
    fn test_engine_has_no_limits() {
        let engine = build_engine();

        assert_eq!(engine.max_operations(), 0);
        assert_eq!(engine.max_call_levels(), usize::MAX);
        assert_eq!(engine.max_expr_depth(), 0);
        assert_eq!(engine.max_function_expr_depth(), 0);
        assert_eq!(engine.max_string_size(), 0);
        assert_eq!(engine.max_array_size(), 0);
        assert_eq!(engine.max_map_size(), 0);
    }

    #[test]
    fn test_call_registered_function() {
        let (engine, mut scope) = engine_with_registry();
        let result: String = engine
            .eval_with_scope(&mut scope, r#"salt.invoke("test.recho", ["hello"])"#)
            .unwrap();
        assert_eq!(result, "olleh");
    }

    #[test]
    fn test_call_without_arguments() {
        let (engine, mut scope) = engine_with_registry();
        let result: bool = engine
            .eval_with_scope(&mut scope, r#"salt.invoke("test.ping")"#)
            .unwrap();
        assert!(result);
    }

    #[test]
    fn test_has_and_list() {
        let (engine, mut scope) = engine_with_registry();
        let has: bool = engine
            .eval_with_scope(&mut scope, r#"salt.has("cmd.run") && !salt.has("pkg.installed")"#)
            .unwrap();
        assert!(has);

        let count: i64 = engine
            .eval_with_scope(&mut scope, "salt.list().len()")
            .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_unknown_function_is_runtime_error() {
        let (engine, mut scope) = engine_with_registry();
        let err = engine
            .eval_with_scope::<Dynamic>(&mut scope, r#"salt.invoke("pkg.installed")"#)
            .unwrap_err();
        assert!(err.to_string().contains("'pkg.installed' is not available"));
    }
}
