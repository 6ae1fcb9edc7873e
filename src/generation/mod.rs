pub mod orchestrator;
pub mod prompt;
pub mod validate;

pub use orchestrator::{GenerateRequest, GenerationOutcome, Submission};
pub use validate::ValidationError;

use serde_json::Value;

/// Natural string form of a submitted value, without JSON quoting. Arrays
/// join their elements with ", ".
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
