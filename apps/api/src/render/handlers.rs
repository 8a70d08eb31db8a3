use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::render::markup::{MarkupEdit, RichText};
use crate::render::{
    compose_preview, expand_inline, insert_markup, preview_markup, MarkupAction, PreviewDocument,
    PreviewOptions, Selection,
};
use crate::resume::Resume;
use crate::templates::{validate_template_value, TemplateValidation};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub resume: Resume,
    #[serde(default)]
    pub template: Value,
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub validation: TemplateValidation,
    pub document: PreviewDocument,
}

#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub text: String,
    /// Editor preview pane: empty text shows a placeholder instead of nothing.
    #[serde(default)]
    pub preview: bool,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub html: RichText,
}

#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    pub value: String,
    pub selection: Selection,
    pub action: MarkupAction,
}

/// POST /api/v1/preview
/// Stateless preview: the template is resolved first, then the resume is composed
/// against whatever id the validator settled on.
pub async fn handle_preview(Json(req): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let validation = validate_template_value(&req.template);
    let document = compose_preview(
        &req.resume,
        &validation.resolved_id,
        PreviewOptions {
            dark_mode: req.dark_mode,
        },
    );
    Json(PreviewResponse {
        validation,
        document,
    })
}

/// POST /api/v1/markup/expand
pub async fn handle_expand_markup(Json(req): Json<ExpandRequest>) -> Json<ExpandResponse> {
    let html = if req.preview {
        preview_markup(&req.text)
    } else {
        expand_inline(&req.text)
    };
    Json(ExpandResponse { html })
}

/// POST /api/v1/markup/insert
pub async fn handle_insert_markup(Json(req): Json<InsertRequest>) -> Json<MarkupEdit> {
    Json(insert_markup(&req.value, req.selection, req.action))
}
