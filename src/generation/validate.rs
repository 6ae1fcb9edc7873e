use serde_json::Value;

use crate::store::schema::{ChoiceOption, Parameter, ValueSpec};

use super::display_value;

/// Request-validation failures, surfaced to the caller as a single
/// human-readable message. Produced before any upstream call and always
/// terminal for the request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("No parameters provided for generation")]
    EmptyInput,

    #[error("Category \"{0}\" not found")]
    CategoryNotFound(String),

    #[error("Category \"{0}\" is not visible")]
    CategoryHidden(String),

    #[error("Parameter \"{0}\" not found")]
    ParameterNotFound(String),

    #[error("Parameter \"{parameter}\" does not belong to category \"{category}\"")]
    ParameterMismatch { parameter: String, category: String },

    #[error("Parameter \"{0}\" is not visible")]
    ParameterHidden(String),

    #[error("Value \"{value}\" is not valid for {kind} parameter \"{parameter}\"")]
    InvalidChoice {
        parameter: String,
        kind: &'static str,
        value: String,
    },

    #[error("Value for slider parameter \"{0}\" must be a number")]
    NotANumber(String),

    #[error("Value {value} is outside the range [{min}-{max}] for slider parameter \"{parameter}\"")]
    OutOfRange {
        parameter: String,
        value: String,
        min: f64,
        max: f64,
    },

    #[error("Value for {kind} parameter \"{parameter}\" must be {expected}")]
    WrongType {
        parameter: String,
        kind: &'static str,
        expected: &'static str,
    },
}

/// Check one submitted value against its parameter definition. Pure; the
/// verdict for a given (parameter, value) pair never changes.
pub fn validate(parameter: &Parameter, value: &Value) -> Result<(), ValidationError> {
    match &parameter.spec {
        ValueSpec::Dropdown(options) => expect_choice(parameter, "dropdown", options, value),
        ValueSpec::RadioButtons(options) => expect_choice(parameter, "radio", options, value),
        ValueSpec::Checkbox(options) => {
            let Some(items) = value.as_array() else {
                return Err(ValidationError::WrongType {
                    parameter: parameter.name.clone(),
                    kind: "checkbox",
                    expected: "an array",
                });
            };
            for item in items {
                expect_choice(parameter, "checkbox", options, item)?;
            }
            Ok(())
        }
        ValueSpec::Slider(range) => {
            let Some(number) = coerce_number(value) else {
                return Err(ValidationError::NotANumber(parameter.name.clone()));
            };
            if number < range.min || number > range.max {
                return Err(ValidationError::OutOfRange {
                    parameter: parameter.name.clone(),
                    value: display_value(value),
                    min: range.min,
                    max: range.max,
                });
            }
            Ok(())
        }
        ValueSpec::ToggleSwitch(_) => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(ValidationError::WrongType {
                    parameter: parameter.name.clone(),
                    kind: "toggle",
                    expected: "a boolean",
                })
            }
        }
    }
}

fn expect_choice(
    parameter: &Parameter,
    kind: &'static str,
    options: &[ChoiceOption],
    value: &Value,
) -> Result<(), ValidationError> {
    let matched = value
        .as_str()
        .is_some_and(|label| options.iter().any(|option| option.label == label));
    if matched {
        Ok(())
    } else {
        Err(ValidationError::InvalidChoice {
            parameter: parameter.name.clone(),
            kind,
            value: display_value(value),
        })
    }
}

/// Numbers and numeric strings both count; anything non-finite does not.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
