// ABOUTME: Render module turning state scripts into configuration trees
// ABOUTME: Template location, execution context assembly, result envelopes and the renderer

pub mod context;
pub mod envelope;
pub mod error;
pub mod locator;
pub mod renderer;

pub use context::{Binding, ContextBuilder, ExecutionContext, RESERVED_BINDINGS};
pub use envelope::ResultEnvelope;
pub use error::{Result, TemplateError, DEFAULT_RENDER_ERROR};
pub use locator::locate;
pub use renderer::{ConfigurationTree, RenderOptions, Renderer};
