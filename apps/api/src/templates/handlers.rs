use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::templates::registry::{
    category_of, is_registered, metadata_of, template_summaries, TemplateMetadata,
    TemplateSummary,
};
use crate::templates::{validate_template_value, TemplateCategory, TemplateValidation};

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetailResponse {
    pub id: String,
    pub is_valid: bool,
    pub category: TemplateCategory,
    pub metadata: &'static TemplateMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTemplateRequest {
    #[serde(default)]
    pub template_id: Value,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: template_summaries(),
    })
}

/// GET /api/v1/templates/:id
/// Unknown ids still answer with the fallback metadata, flagged `isValid: false`.
pub async fn handle_get_template(Path(id): Path<String>) -> Json<TemplateDetailResponse> {
    let is_valid = is_registered(&id);
    Json(TemplateDetailResponse {
        category: category_of(&id),
        metadata: metadata_of(&id),
        id,
        is_valid,
    })
}

/// POST /api/v1/templates/validate
pub async fn handle_validate_template(
    Json(req): Json<ValidateTemplateRequest>,
) -> Json<TemplateValidation> {
    Json(validate_template_value(&req.template_id))
}
