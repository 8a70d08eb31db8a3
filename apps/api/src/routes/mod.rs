pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template catalogue
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/validate",
            post(templates::handle_validate_template),
        )
        .route("/api/v1/templates/:id", get(templates::handle_get_template))
        // Stateless rendering
        .route("/api/v1/preview", post(render::handle_preview))
        .route("/api/v1/markup/expand", post(render::handle_expand_markup))
        .route("/api/v1/markup/insert", post(render::handle_insert_markup))
        // Editing sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(session::handle_select_template),
        )
        .route("/api/v1/sessions/:id/theme", put(session::handle_set_theme))
        .route(
            "/api/v1/sessions/:id/preview",
            get(session::handle_session_preview),
        )
        .route(
            "/api/v1/sessions/:id/personal",
            patch(session::handle_update_personal),
        )
        .route(
            "/api/v1/sessions/:id/sections",
            post(session::handle_add_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id",
            delete(session::handle_remove_section).patch(session::handle_update_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items",
            post(session::handle_add_item),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items/:index",
            patch(session::handle_update_item).delete(session::handle_remove_item),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items/:index/visibility",
            post(session::handle_toggle_item),
        )
        .route("/api/v1/sessions/:id/export", get(session::handle_export))
        .route("/api/v1/sessions/:id/import", post(session::handle_import))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::preferences::InMemoryPreferenceStore;
    use crate::session::SessionStore;

    fn test_router() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let state = AppState {
            sessions: SessionStore::new(config.max_sessions, chrono::Duration::minutes(30)),
            preferences: Arc::new(InMemoryPreferenceStore::default()),
            config,
        };
        build_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_router();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "vitae-api");
    }

    #[tokio::test]
    async fn test_template_catalogue() {
        let app = test_router();
        let (status, body) = send(&app, Method::GET, "/api/v1/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["templates"].as_array().unwrap().len(), 18);
        assert_eq!(body["templates"][0]["id"], "modern");

        let (_, detail) = send(&app, Method::GET, "/api/v1/templates/nope", None).await;
        assert_eq!(detail["isValid"], false);
        assert_eq!(detail["category"], "modern");
        assert_eq!(detail["metadata"]["name"], "Modern");
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let app = test_router();
        let (_, ok) = send(
            &app,
            Method::POST,
            "/api/v1/templates/validate",
            Some(json!({ "templateId": "classic" })),
        )
        .await;
        assert_eq!(ok["isValid"], true);
        assert_eq!(ok["resolvedId"], "classic");

        let (_, bad) = send(
            &app,
            Method::POST,
            "/api/v1/templates/validate",
            Some(json!({ "templateId": 7 })),
        )
        .await;
        assert_eq!(bad["isValid"], false);
        assert_eq!(bad["resolvedId"], "modern");
        assert_eq!(bad["error"], "Invalid template ID");
    }

    #[tokio::test]
    async fn test_stateless_preview_falls_back() {
        let app = test_router();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/preview",
            Some(json!({
                "resume": { "personalInfo": { "fullName": "Ada" }, "sections": [] },
                "template": "galaxy",
                "darkMode": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["validation"]["isValid"], false);
        assert_eq!(body["document"]["templateId"], "modern");
        assert_eq!(body["document"]["darkMode"], true);
        assert_eq!(body["document"]["header"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_preview_renders_unknown_section_type() {
        let app = test_router();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/preview",
            Some(json!({
                "resume": {
                    "sections": [{
                        "id": "hobbies-1",
                        "title": "Hobbies",
                        "type": "hobbies",
                        "items": [{ "name": "Sailing" }]
                    }]
                },
                "template": "minimal"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let section = &body["document"]["sections"][0];
        assert_eq!(section["kind"], "hobbies");
        assert_eq!(section["layout"], "fields");
        assert_eq!(section["entries"][0][0]["label"], "name");
        assert_eq!(section["entries"][0][0]["value"], "Sailing");
    }

    #[tokio::test]
    async fn test_markup_endpoints() {
        let app = test_router();
        let (_, expanded) = send(
            &app,
            Method::POST,
            "/api/v1/markup/expand",
            Some(json!({ "text": "**hi**" })),
        )
        .await;
        assert_eq!(expanded["html"], "<strong>hi</strong>");

        let (_, placeholder) = send(
            &app,
            Method::POST,
            "/api/v1/markup/expand",
            Some(json!({ "text": "", "preview": true })),
        )
        .await;
        assert_eq!(placeholder["html"], "Nothing to preview...");

        let (_, edit) = send(
            &app,
            Method::POST,
            "/api/v1/markup/insert",
            Some(json!({
                "value": "hello",
                "selection": { "start": 0, "end": 5 },
                "action": "bold"
            })),
        )
        .await;
        assert_eq!(edit["value"], "**hello**");
    }

    #[tokio::test]
    async fn test_session_editing_flow() {
        let app = test_router();
        let (status, created) =
            send(&app, Method::POST, "/api/v1/sessions?template=creative", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["templateId"], "creative");
        let id = created["id"].as_str().unwrap().to_string();
        let base = format!("/api/v1/sessions/{id}");

        let (status, _) = send(
            &app,
            Method::PATCH,
            &format!("{base}/personal"),
            Some(json!({ "fullName": "Grace Hopper" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, added) = send(
            &app,
            Method::POST,
            &format!("{base}/sections/experience/items"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(added["index"], 0);

        let (status, section) = send(
            &app,
            Method::PATCH,
            &format!("{base}/sections/experience/items/0"),
            Some(json!({ "position": "Admiral", "company": "US Navy" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(section["items"][0]["position"], "Admiral");

        let (status, err) = send(
            &app,
            Method::PATCH,
            &format!("{base}/sections/experience/items/0"),
            Some(json!({ "salary": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("{base}/theme"),
            Some(json!({ "theme": "dark" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, preview) = send(&app, Method::GET, &format!("{base}/preview"), None).await;
        assert_eq!(preview["document"]["header"]["name"], "Grace Hopper");
        assert_eq!(preview["document"]["darkMode"], true);
        assert_eq!(preview["document"]["sections"][0]["id"], "experience");

        let (status, _) = send(&app, Method::DELETE, &base, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &base, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let app = test_router();
        let (_, created) = send(&app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(created["templateId"], "modern");
        assert_eq!(created["templateError"], Value::Null);
        let base = format!("/api/v1/sessions/{}", created["id"].as_str().unwrap());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("{base}/export"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume-data.json\""
        );
        let exported = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("{base}/import"),
            Some(serde_json::from_slice(&exported).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, err) = send(
            &app,
            Method::POST,
            &format!("{base}/import"),
            Some(json!({ "sections": [
                { "id": "a", "title": "A", "type": "skills", "items": [] },
                { "id": "a", "title": "B", "type": "awards", "items": [] }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"]["code"], "VALIDATION_ERROR");
    }
}
