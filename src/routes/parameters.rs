use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;
use crate::store::schema::{
    new_parameter_id, Parameter, ParameterUpdate, ParameterVisibility, ValueSpec,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterFilter {
    category_id: Option<String>,
}

/// Wire shape shared by create and update: the spec arrives as the split
/// `type` + `values` pair used in the persisted document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterPayload {
    name: Option<String>,
    visibility: Option<ParameterVisibility>,
    category_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    values: Option<serde_json::Value>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ParameterFilter>,
) -> Result<Json<Value>, AppError> {
    let parameters = match filter.category_id {
        Some(category_id) => state.store.parameters_by_category(&category_id)?,
        None => state.store.parameters()?,
    };
    Ok(Json(json!({ "success": true, "data": parameters })))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let parameter = state
        .store
        .parameter_by_id(&id)?
        .ok_or_else(|| AppError::NotFound("Parameter not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": parameter })))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ParameterPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let name = body
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Parameter name is required".to_string()))?;
    let kind = body
        .kind
        .ok_or_else(|| AppError::BadRequest("Valid parameter type is required".to_string()))?;
    let category_id = body
        .category_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Category ID is required".to_string()))?;

    if state.store.category_by_id(&category_id)?.is_none() {
        return Err(AppError::NotFound("Category not found".to_string()));
    }
    let spec = ValueSpec::from_parts(&kind, body.values.unwrap_or(Value::Null))
        .map_err(AppError::BadRequest)?;
    spec.check_definition().map_err(AppError::BadRequest)?;

    let parameter = Parameter {
        id: new_parameter_id(),
        name,
        visibility: body.visibility.unwrap_or(ParameterVisibility::Basic),
        category_id,
        spec,
    };
    let created = state.store.create_parameter(parameter)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ParameterPayload>,
) -> Result<Json<Value>, AppError> {
    let existing = state
        .store
        .parameter_by_id(&id)?
        .ok_or_else(|| AppError::NotFound("Parameter not found".to_string()))?;

    // Moving a parameter requires the target category to exist.
    if let Some(category_id) = &body.category_id {
        if *category_id != existing.category_id
            && state.store.category_by_id(category_id)?.is_none()
        {
            return Err(AppError::NotFound("Category not found".to_string()));
        }
    }

    // Revalidate the spec whenever the type or the values change; absent
    // halves are filled in from the stored parameter.
    let spec = match (body.kind, body.values) {
        (None, None) => None,
        (kind, values) => {
            let kind = kind.unwrap_or_else(|| existing.spec.kind().to_string());
            let values = match values {
                Some(values) => values,
                None => serde_json::to_value(&existing.spec)?
                    .get("values")
                    .cloned()
                    .unwrap_or(Value::Null),
            };
            let spec = ValueSpec::from_parts(&kind, values).map_err(AppError::BadRequest)?;
            spec.check_definition().map_err(AppError::BadRequest)?;
            Some(spec)
        }
    };

    let update = ParameterUpdate {
        name: body.name,
        visibility: body.visibility,
        category_id: body.category_id,
        spec,
    };
    let updated = state
        .store
        .update_parameter(&id, update)?
        .ok_or_else(|| AppError::NotFound("Parameter not found".to_string()))?;
    Ok(Json(json!({ "success": true, "data": updated })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .store
        .delete_parameter(&id)?
        .ok_or_else(|| AppError::NotFound("Parameter not found".to_string()))?;
    Ok(Json(json!({
        "success": true,
        "message": "Parameter deleted successfully"
    })))
}
