use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::ai::{GenerationAdapter, GenerationMode, GenerationResult};
use crate::error::AppError;
use crate::store::schema::{Category, CategoryVisibility, Parameter};
use crate::store::JsonStore;

use super::prompt::{self, ResolvedParameters};
use super::validate::{self, ValidationError};

/// Nested selection sent by the wizard: category id -> parameter id ->
/// submitted value. Insertion order is preserved so prompt output is
/// deterministic for a given request body.
pub type Submission = IndexMap<String, IndexMap<String, Value>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub parameter_values: Submission,
    #[serde(default)]
    pub generation_type: Option<String>,
}

/// Adapter result plus the resolved name-keyed mapping it was built from.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub mode: GenerationMode,
    pub result: GenerationResult,
    pub resolved: ResolvedParameters,
}

/// Run one generation request end to end: resolve ids against a single store
/// snapshot, validate every submitted value, format the prompt, and invoke
/// the adapter. Any validation failure aborts the whole request before the
/// adapter is called; there are no retries.
pub async fn handle(
    store: &JsonStore,
    adapter: &dyn GenerationAdapter,
    request: &GenerateRequest,
) -> Result<GenerationOutcome, AppError> {
    if request.parameter_values.is_empty() {
        return Err(ValidationError::EmptyInput.into());
    }
    let mode = match request.generation_type.as_deref() {
        Some(raw) => GenerationMode::parse(raw)?,
        None => GenerationMode::Fiction,
    };

    let document = store.snapshot()?;
    let categories: HashMap<&str, &Category> = document
        .categories
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();
    let parameters: HashMap<&str, &Parameter> = document
        .parameters
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect();

    let mut resolved = ResolvedParameters::new();
    for (category_id, selections) in &request.parameter_values {
        let category = *categories
            .get(category_id.as_str())
            .ok_or_else(|| ValidationError::CategoryNotFound(category_id.clone()))?;
        if category.visibility != CategoryVisibility::Show {
            return Err(ValidationError::CategoryHidden(category.name.clone()).into());
        }

        let entries = resolved.entry(category.name.clone()).or_default();
        for (parameter_id, value) in selections {
            let parameter = *parameters
                .get(parameter_id.as_str())
                .ok_or_else(|| ValidationError::ParameterNotFound(parameter_id.clone()))?;
            if parameter.category_id != category.id {
                return Err(ValidationError::ParameterMismatch {
                    parameter: parameter_id.clone(),
                    category: category.name.clone(),
                }
                .into());
            }
            if !parameter.visibility.is_usable() {
                return Err(ValidationError::ParameterHidden(parameter.name.clone()).into());
            }
            validate::validate(parameter, value)?;
            entries.insert(parameter.name.clone(), value.clone());
        }
    }

    let formatted = match mode {
        GenerationMode::Fiction => prompt::format_fiction_prompt(&resolved),
        GenerationMode::Image => prompt::format_image_prompt(&resolved),
    };
    tracing::debug!(mode = mode.as_str(), resolved = ?resolved, "dispatching generation request");

    let result = adapter.generate(&formatted, mode).await;
    if !result.success {
        tracing::error!(
            mode = mode.as_str(),
            error = result.error.as_deref().unwrap_or("unknown"),
            "upstream generation failed"
        );
    }
    Ok(GenerationOutcome {
        mode,
        result,
        resolved,
    })
}
