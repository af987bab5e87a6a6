// ABOUTME: Shell command execution function for state scripts
// ABOUTME: Runs a command through sh -c and returns its trimmed standard output

use serde_json::Value;
use std::process::Command;
use tracing::{debug, warn};

use super::{string_arg, ExecutionFunction, FunctionError, Result};

pub struct Run;

impl ExecutionFunction for Run {
    fn name(&self) -> &str {
        "cmd.run"
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let command = string_arg(self.name(), args)?;
        debug!("Executing command: {}", command);

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|e| FunctionError::CallFailed {
                name: self.name().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("Command '{}' exited with {}", command, output.status);
            return Err(FunctionError::CallFailed {
                name: self.name().to_string(),
                message: format!("command exited with {}: {}", output.status, stderr),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Value::String(stdout))
    }
}
