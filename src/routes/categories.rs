use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;
use crate::store::schema::{new_category_id, Category, CategoryUpdate, CategoryVisibility};

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    name: Option<String>,
    visibility: Option<CategoryVisibility>,
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let categories = state.store.categories()?;
    Ok(Json(json!({ "success": true, "data": categories })))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let category = state
        .store
        .category_by_id(&id)?
        .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found", id)))?;
    Ok(Json(json!({ "success": true, "data": category })))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCategory>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let name = body
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Name is required for a category".to_string()))?;

    let category = Category {
        id: new_category_id(),
        name,
        visibility: body.visibility.unwrap_or(CategoryVisibility::Show),
    };
    let created = state.store.create_category(category)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    ))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<CategoryUpdate>,
) -> Result<Json<Value>, AppError> {
    if body.name.is_none() && body.visibility.is_none() {
        return Err(AppError::BadRequest(
            "At least one field (name or visibility) is required for update".to_string(),
        ));
    }
    let updated = state
        .store
        .update_category(&id, body)?
        .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found", id)))?;
    Ok(Json(json!({ "success": true, "data": updated })))
}

/// Deletion cascades: the response reports the category together with every
/// parameter removed along with it.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = state
        .store
        .delete_category(&id)?
        .ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found", id)))?;
    let parameter_count = removed.parameters.len();
    Ok(Json(json!({
        "success": true,
        "message": format!("Category '{}' deleted successfully", removed.category.name),
        "data": {
            "deletedCategory": removed.category,
            "deletedParameters": removed.parameters,
            "parameterCount": parameter_count
        }
    })))
}
