// ABOUTME: Result envelope returned by script executors
// ABOUTME: The {result, data} pair is the only contract between the renderer and an executor

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of executing a script.
///
/// A successful envelope carries the configuration tree in `data`; a failed
/// one carries an optional diagnostic string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResultEnvelope {
    pub fn success(data: Value) -> Self {
        Self {
            result: true,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: false,
            data: Some(Value::String(message.into())),
        }
    }

    pub fn failure_without_data() -> Self {
        Self {
            result: false,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result
    }

    /// Diagnostic text carried by a failed envelope, if any.
    ///
    /// Empty strings and `null` count as absent. Non-string payloads are
    /// reported in their JSON form.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.data {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_from_failure() {
        let envelope = ResultEnvelope::failure("syntax error at line 4");
        assert!(!envelope.is_success());
        assert_eq!(
            envelope.diagnostic(),
            Some("syntax error at line 4".to_string())
        );
    }

    #[test]
    fn test_empty_diagnostics_are_absent() {
        assert_eq!(ResultEnvelope::failure("").diagnostic(), None);
        assert_eq!(ResultEnvelope::failure_without_data().diagnostic(), None);
    }

    #[test]
    fn test_envelope_deserializes_without_data() {
        let envelope: ResultEnvelope = serde_json::from_value(json!({"result": false})).unwrap();
        assert_eq!(envelope, ResultEnvelope::failure_without_data());
    }
}
