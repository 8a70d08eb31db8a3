//! Axum route handlers for the editing-session API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::preferences::{forget_theme, load_theme, save_theme, Theme};
use crate::render::{compose_preview, PreviewDocument, PreviewOptions};
use crate::resume::{
    export_json, import_json, FieldPatch, PersonalInfo, Section, SectionKind, SectionToggle,
    EXPORT_FILE_NAME,
};
use crate::session::EditorSession;
use crate::state::AppState;
use crate::templates::registry::TemplateMetadata;
use crate::templates::{metadata_of, TemplateValidation};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateSessionQuery {
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateRequest {
    #[serde(default)]
    pub template_id: Value,
}

#[derive(Debug, Serialize)]
pub struct SelectTemplateResponse {
    pub validation: TemplateValidation,
    pub metadata: &'static TemplateMetadata,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPreviewResponse {
    pub template_error: Option<String>,
    pub document: PreviewDocument,
}

#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub kind: SectionKind,
}

#[derive(Debug, Deserialize)]
pub struct ToggleChange {
    pub name: SectionToggle,
    pub on: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    pub title: Option<String>,
    pub is_visible: Option<bool>,
    pub toggle: Option<ToggleChange>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionResponse {
    pub section: Section,
    /// `false` when the requested toggle is not declared by the section's kind.
    pub toggle_applied: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub index: usize,
    pub section: Section,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemVisibilityResponse {
    pub is_visible: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// Evicts idle sessions and forgets their stored preferences.
pub async fn evict_idle_sessions(state: &AppState) -> usize {
    let evicted = state.sessions.evict_idle().await;
    for id in &evicted {
        forget_theme(state.preferences.as_ref(), *id).await;
    }
    evicted.len()
}

/// POST /api/v1/sessions?template=
/// An absent or empty `template` opens the default template without an advisory.
pub async fn handle_create_session(
    State(state): State<AppState>,
    Query(query): Query<CreateSessionQuery>,
) -> Result<(StatusCode, Json<EditorSession>), AppError> {
    evict_idle_sessions(&state).await;
    let template = query.template.as_deref().filter(|t| !t.is_empty());
    let session = state.sessions.create(template).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditorSession>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    forget_theme(state.preferences.as_ref(), id).await;
    info!("{} sessions still open", state.sessions.len().await);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectTemplateRequest>,
) -> Result<Json<SelectTemplateResponse>, AppError> {
    let (validation, _) = state
        .sessions
        .update(id, |session| Ok(session.select_template(&req.template_id)))
        .await?;
    info!("Session {id} template -> {}", validation.resolved_id);
    let metadata = metadata_of(&validation.resolved_id);
    Ok(Json(SelectTemplateResponse {
        validation,
        metadata,
    }))
}

/// PUT /api/v1/sessions/:id/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    state.sessions.get(id).await?;
    save_theme(state.preferences.as_ref(), id, body.theme).await;
    Ok(Json(body))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_session_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionPreviewResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    let theme = load_theme(
        state.preferences.as_ref(),
        id,
        state.config.default_theme,
    )
    .await;
    let document = compose_preview(
        &session.resume,
        &session.template_id,
        PreviewOptions {
            dark_mode: theme.is_dark(),
        },
    );
    Ok(Json(SessionPreviewResponse {
        template_error: session.template_error,
        document,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Resume editing
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/sessions/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FieldPatch>,
) -> Result<Json<PersonalInfo>, AppError> {
    let (_, session) = state
        .sessions
        .update(id, |session| Ok(session.resume.update_personal_info(&patch)?))
        .await?;
    Ok(Json(session.resume.personal_info))
}

/// POST /api/v1/sessions/:id/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddSectionRequest>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    let (section, _) = state
        .sessions
        .update(id, |session| Ok(session.resume.add_section(req.kind).clone()))
        .await?;
    info!("Session {id}: added {} section {}", req.kind.as_str(), section.id);
    Ok((StatusCode::CREATED, Json(section)))
}

/// DELETE /api/v1/sessions/:id/sections/:section_id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .update(id, |session| Ok(session.resume.remove_section(&section_id)?))
        .await?;
    info!("Session {id}: removed section {section_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/sections/:section_id
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
    Json(req): Json<UpdateSectionRequest>,
) -> Result<Json<UpdateSectionResponse>, AppError> {
    let (toggle_applied, session) = state
        .sessions
        .update(id, |session| {
            let resume = &mut session.resume;
            let current = resume
                .section(&section_id)
                .map(|s| s.is_visible)
                .ok_or_else(|| AppError::NotFound(format!("Section '{section_id}' not found")))?;

            if let Some(title) = &req.title {
                resume.rename_section(&section_id, title.clone())?;
            }
            if req.is_visible.is_some_and(|wanted| wanted != current) {
                resume.toggle_section_visibility(&section_id)?;
            }
            req.toggle
                .as_ref()
                .map(|t| resume.set_section_toggle(&section_id, t.name, t.on))
                .transpose()
                .map_err(AppError::from)
        })
        .await?;

    let section = session
        .resume
        .section(&section_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Section '{section_id}' not found")))?;
    Ok(Json(UpdateSectionResponse {
        section,
        toggle_applied,
    }))
}

/// POST /api/v1/sessions/:id/sections/:section_id/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<AddItemResponse>), AppError> {
    let (index, session) = state
        .sessions
        .update(id, |session| Ok(session.resume.add_item(&section_id)?))
        .await?;
    let section = owned_section(&session, &section_id)?;
    Ok((StatusCode::CREATED, Json(AddItemResponse { index, section })))
}

/// PATCH /api/v1/sessions/:id/sections/:section_id/items/:index
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((id, section_id, index)): Path<(Uuid, String, usize)>,
    Json(patch): Json<FieldPatch>,
) -> Result<Json<Section>, AppError> {
    let (_, session) = state
        .sessions
        .update(id, |session| {
            Ok(session.resume.update_item(&section_id, index, &patch)?)
        })
        .await?;
    Ok(Json(owned_section(&session, &section_id)?))
}

/// DELETE /api/v1/sessions/:id/sections/:section_id/items/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((id, section_id, index)): Path<(Uuid, String, usize)>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .update(id, |session| Ok(session.resume.remove_item(&section_id, index)?))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/sections/:section_id/items/:index/visibility
pub async fn handle_toggle_item(
    State(state): State<AppState>,
    Path((id, section_id, index)): Path<(Uuid, String, usize)>,
) -> Result<Json<ItemVisibilityResponse>, AppError> {
    let (is_visible, _) = state
        .sessions
        .update(id, |session| {
            Ok(session.resume.toggle_item_visibility(&section_id, index)?)
        })
        .await?;
    Ok(Json(ItemVisibilityResponse { is_visible }))
}

// ────────────────────────────────────────────────────────────────────────────
// Export / import
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let body = export_json(&session.resume)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/sessions/:id/import
pub async fn handle_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<Json<EditorSession>, AppError> {
    let resume = import_json(&body)?;
    let (_, session) = state
        .sessions
        .update(id, |session| {
            session.resume = resume;
            Ok(())
        })
        .await?;
    info!(
        "Session {id}: imported resume with {} sections",
        session.resume.sections.len()
    );
    Ok(Json(session))
}

fn owned_section(session: &EditorSession, section_id: &str) -> Result<Section, AppError> {
    session
        .resume
        .section(section_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Section '{section_id}' not found")))
}
