//! Axum route handlers for the Resume Optimization Workflow.
//!
//! Handlers translate HTTP into session operations; every state rule lives
//! in `workflow::session`, not here.

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::auth::handlers::require_user;
use crate::errors::AppError;
use crate::intake;
use crate::models::job::JobTargetUpdate;
use crate::models::user::User;
use crate::optimize::ParameterUpdate;
use crate::state::AppState;
use crate::templates::{self, ExportArtifact, RenderedResume, TemplateId};
use crate::workflow::session::WorkflowView;
use crate::workflow::{reoptimize_if_configured, spawn_optimization, start_optimization};

#[derive(Debug, Serialize)]
pub struct TemplateListEntry {
    pub id: TemplateId,
    pub label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct TemplateSelection {
    pub template: TemplateId,
}

/// Resolves the caller and checks they own the session.
async fn require_session_owner(
    headers: &HeaderMap,
    state: &AppState,
    session_id: Uuid,
) -> Result<User, AppError> {
    let user = require_user(headers, state).await?;
    let owner = state
        .sessions
        .with_session(session_id, |session| Ok(session.owner))
        .await?;
    if owner != user.id {
        // Do not reveal whether the session exists to non-owners.
        return Err(AppError::NotFound(format!(
            "Workflow session {session_id} not found"
        )));
    }
    Ok(user)
}

/// Pulls the uploaded file (name + bytes) out of a multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Upload is missing a filename".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Decode(format!("Could not read upload: {e}")))?;
        return Ok((filename, data));
    }
    Err(AppError::Validation(
        "Expected a multipart field named 'file'".to_string(),
    ))
}

/// POST /api/v1/workflow
pub async fn handle_create_workflow(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<WorkflowView>, AppError> {
    let user = require_user(&headers, &state).await?;
    let view = state.sessions.create(user.id).await;
    tracing::info!("Created workflow session {} for {}", view.session_id, user.email);
    Ok(Json(view))
}

/// GET /api/v1/workflow/:id
pub async fn handle_get_workflow(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/workflow/:id/resume — multipart resume upload.
///
/// The decode callback is the sole source of truth for the stored resume;
/// a decode that loses the intake-token race is dropped, not applied.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    let (filename, data) = read_upload(multipart).await?;

    let token = state
        .sessions
        .with_session(id, |session| Ok(session.begin_intake()))
        .await?;

    // Decode failure surfaces here; the session does not transition.
    let raw = intake::ingest_resume(&filename, data).await?;

    let committed = state
        .sessions
        .with_session(id, |session| Ok(session.commit_resume(token, raw)))
        .await?;
    if !committed {
        warn!("Session {id}: dropped stale resume decode for '{filename}'");
    }
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/workflow/:id/job/upload — multipart job-description upload.
pub async fn handle_upload_job_description(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    let (filename, data) = read_upload(multipart).await?;

    let token = state
        .sessions
        .with_session(id, |session| Ok(session.begin_intake()))
        .await?;

    let text = intake::ingest_job_description(&filename, data).await?;

    let committed = state
        .sessions
        .with_session(id, |session| Ok(session.commit_job_description(token, text)))
        .await?;
    if !committed {
        warn!("Session {id}: dropped stale job-description decode for '{filename}'");
    }
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/workflow/:id/job — free-form edits to title/company/description.
pub async fn handle_update_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(update): Json<JobTargetUpdate>,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    state
        .sessions
        .with_session(id, |session| {
            session.update_job(update);
            Ok(())
        })
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/workflow/:id/optimize
///
/// Enters `Optimizing` and returns the busy view immediately; the engine run
/// completes on a spawned task and commits under its run token.
pub async fn handle_optimize(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    let (token, inputs) = start_optimization(&state.sessions, id).await?;
    spawn_optimization(state.sessions.clone(), state.engine.clone(), id, token, inputs);
    Ok(Json(state.sessions.view(id).await?))
}

/// POST /api/v1/workflow/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    state
        .sessions
        .with_session(id, |session| session.reset_optimization())
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// PATCH /api/v1/workflow/:id/parameters
pub async fn handle_update_parameters(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(update): Json<ParameterUpdate>,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    state
        .sessions
        .with_session(id, |session| session.update_parameters(update))
        .await?;
    let view = reoptimize_if_configured(
        &state.sessions,
        state.engine.clone(),
        id,
        state.config.auto_reoptimize,
    )
    .await?;
    Ok(Json(view))
}

/// PUT /api/v1/workflow/:id/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(selection): Json<TemplateSelection>,
) -> Result<Json<WorkflowView>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    state
        .sessions
        .with_session(id, |session| session.select_template(selection.template))
        .await?;
    Ok(Json(state.sessions.view(id).await?))
}

/// GET /api/v1/workflow/:id/preview — presentational tree for the profile
/// currently on display, in the selected template.
pub async fn handle_preview(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderedResume>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    state
        .sessions
        .with_session(id, |session| {
            let profile = session.display_profile().ok_or_else(|| {
                AppError::Validation("Upload a resume to preview it".to_string())
            })?;
            Ok(templates::render::render(profile, session.template()))
        })
        .await
        .map(Json)
}

/// GET /api/v1/workflow/:id/export — idempotent export trigger; valid
/// against the optimized profile or the raw one, no state effect.
pub async fn handle_export(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ExportArtifact>, AppError> {
    require_session_owner(&headers, &state, id).await?;
    state
        .sessions
        .with_session(id, |session| {
            let profile = session.display_profile().ok_or_else(|| {
                AppError::Validation("Upload a resume before downloading".to_string())
            })?;
            Ok(templates::render::export(profile, session.template()))
        })
        .await
        .map(Json)
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateListEntry>> {
    Json(
        TemplateId::all()
            .iter()
            .map(|&id| TemplateListEntry {
                id,
                label: id.label(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_listing_is_ordered_and_labelled() {
        let Json(listing) = handle_list_templates().await;
        assert_eq!(listing.len(), TemplateId::all().len());
        assert_eq!(listing[0].label, "Modern");
        assert_eq!(listing[1].label, "Simple");
    }
}
