// ABOUTME: Main library module for the slsrender state script renderer
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod facts;
pub mod functions;
pub mod output;
pub mod render;
pub mod script;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use facts::HostFacts;
pub use functions::{ExecutionFunction, FunctionRegistry};
pub use render::{
    Binding, ConfigurationTree, ContextBuilder, ExecutionContext, RenderOptions, Renderer,
    ResultEnvelope, TemplateError,
};
pub use script::{RhaiScriptExecutor, ScriptExecutor};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
