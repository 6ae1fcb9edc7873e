pub mod categories;
pub mod generate;
pub mod parameters;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route(
            "/api/parameters",
            get(parameters::list).post(parameters::create),
        )
        .route(
            "/api/parameters/{id}",
            get(parameters::get_by_id)
                .put(parameters::update)
                .delete(parameters::remove),
        )
        .route("/api/generate", post(generate::generate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    use crate::ai::mock::MockAdapter;
    use crate::config::AppConfig;
    use crate::store::JsonStore;

    fn test_app(dir: &TempDir) -> Router {
        let state = Arc::new(AppState {
            config: AppConfig::default(),
            store: JsonStore::new(dir.path().join("database.json")),
            adapter: Box::new(MockAdapter),
        });
        router(state)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn empty_generate_body_is_a_bad_request() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(json_request("POST", "/api/generate", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("No parameters provided for generation"));
    }

    #[tokio::test]
    async fn category_create_and_fetch_round_trip() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/categories",
                json!({ "name": "Fantasy" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response_json(response).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("cat-"));
        assert_eq!(body["data"]["visibility"], json!("Show"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/categories/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["data"]["name"], json!("Fantasy"));
    }

    #[tokio::test]
    async fn nameless_category_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(json_request("POST", "/api/categories", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], json!("Name is required for a category"));
    }

    #[tokio::test]
    async fn parameter_create_requires_an_existing_category() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/parameters",
                json!({
                    "name": "Magic",
                    "categoryId": "cat-404",
                    "type": "Dropdown",
                    "values": [
                        {"id": "m1", "label": "Elemental"},
                        {"id": "m2", "label": "Divine"}
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn parameter_rename_keeps_the_stored_spec() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/categories",
                json!({ "name": "Fantasy" }),
            ))
            .await
            .unwrap();
        let category_id = response_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/parameters",
                json!({
                    "name": "Magic",
                    "categoryId": category_id,
                    "type": "Slider",
                    "values": { "min": 1, "max": 10 }
                }),
            ))
            .await
            .unwrap();
        let parameter_id = response_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/parameters/{}", parameter_id),
                json!({ "name": "Magic Intensity" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["data"]["name"], json!("Magic Intensity"));
        assert_eq!(body["data"]["type"], json!("Slider"));
        assert_eq!(body["data"]["values"]["max"], json!(10.0));
    }

    #[tokio::test]
    async fn generate_round_trip_against_the_mock_adapter() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/categories",
                json!({ "name": "Fantasy" }),
            ))
            .await
            .unwrap();
        let category_id = response_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/parameters",
                json!({
                    "name": "Magic",
                    "categoryId": category_id,
                    "type": "Dropdown",
                    "values": [
                        {"id": "m1", "label": "Elemental"},
                        {"id": "m2", "label": "Divine"}
                    ]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let parameter_id = response_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/generate",
                json!({
                    "parameterValues": {
                        (category_id.clone()): { (parameter_id.clone()): "Elemental" }
                    },
                    "generationType": "fiction"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert!(body["content"].as_str().unwrap().contains("[Placeholder story]"));
        assert_eq!(body["metadata"]["model"], json!("storyforge-mock"));
    }
}
