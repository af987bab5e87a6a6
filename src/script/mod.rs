// ABOUTME: Script execution module for state rendering
// ABOUTME: Defines the executor contract and its Rhai-backed implementation

mod engine;
pub mod executor;

pub use executor::{RhaiScriptExecutor, ScriptExecutor, ENTRY_POINT};
