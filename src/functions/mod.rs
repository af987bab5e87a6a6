// ABOUTME: Registry of execution functions exposed to state scripts
// ABOUTME: Built-in test and cmd functions plus caller-registered custom functions

pub mod cmd;
pub mod error;

pub use error::{FunctionError, Result};

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A named function scripts can invoke through the registry.
pub trait ExecutionFunction: Send + Sync {
    fn name(&self) -> &str;
    fn call(&self, args: &[Value]) -> Result<Value>;
}

struct ClosureFunction<F> {
    name: String,
    func: F,
}

impl<F> ExecutionFunction for ClosureFunction<F>
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }
}

pub struct FunctionRegistry {
    functions: HashMap<String, Box<dyn ExecutionFunction>>,
}

impl FunctionRegistry {
    /// Create a registry holding all built-in functions
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Box::new(test::Ping));
        registry.register(Box::new(test::Echo));
        registry.register(Box::new(test::Recho));
        registry.register(Box::new(test::Arg));
        registry.register(Box::new(cmd::Run));

        registry
    }

    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register a function, replacing any existing one with the same name
    pub fn register(&mut self, function: Box<dyn ExecutionFunction>) {
        let name = function.name().to_string();
        self.functions.insert(name, function);
    }

    pub fn register_fn<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(Box::new(ClosureFunction {
            name: name.to_string(),
            func,
        }));
    }

    pub fn get(&self, name: &str) -> Option<&dyn ExecutionFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.get(name) {
            Some(function) => function.call(args),
            None => Err(FunctionError::NotAvailable {
                name: name.to_string(),
            }),
        }
    }

    pub fn list_functions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.list_functions())
            .finish()
    }
}

/// First argument as a string, or an `InvalidArguments` error.
pub(crate) fn string_arg<'a>(name: &str, args: &'a [Value]) -> Result<&'a str> {
    args.first()
        .and_then(Value::as_str)
        .ok_or_else(|| FunctionError::InvalidArguments {
            name: name.to_string(),
            reason: "expected a string as the first argument".to_string(),
        })
}
