//! HTTP handlers for form endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::form::{
    CreateFormCommand, CreateFormHandler, DeleteFormCommand, DeleteFormHandler, GetFormHandler,
    GetFormQuery, ListFormsHandler, ListFormsQuery, TogglePublishCommand, TogglePublishHandler,
    UpdateFormCommand, UpdateFormHandler,
};
use crate::domain::form::FormPatch;
use crate::domain::foundation::FormId;

use super::dto::{CreateFormRequest, FormEnvelope, FormListResponse, MessageResponse};

#[derive(Clone)]
pub struct FormHandlers {
    pub create: Arc<CreateFormHandler>,
    pub list: Arc<ListFormsHandler>,
    pub get: Arc<GetFormHandler>,
    pub update: Arc<UpdateFormHandler>,
    pub delete: Arc<DeleteFormHandler>,
    pub toggle_publish: Arc<TogglePublishHandler>,
}

pub(crate) fn parse_form_id(raw: &str) -> Result<FormId, ApiError> {
    raw.parse::<FormId>()
        .map_err(|_| ApiError::bad_request("Invalid form ID"))
}

/// GET /api/forms - List the caller's forms, newest first
pub async fn list_forms(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<FormListResponse>, ApiError> {
    let forms = handlers.list.handle(ListFormsQuery { owner: user.id }).await?;
    Ok(Json(forms.into()))
}

/// POST /api/forms - Create a form
pub async fn create_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<CreateFormRequest>,
) -> Result<Response, ApiError> {
    let cmd = CreateFormCommand {
        owner: user.id,
        title: req.title,
        description: req.description,
        goal: req.goal,
        questions: req.questions,
        settings: req.settings,
    };

    let form = handlers.create.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(FormEnvelope::new(&form))).into_response())
}

/// GET /api/forms/:id - Public read, used by respondents
pub async fn get_form(
    State(handlers): State<FormHandlers>,
    Path(form_id): Path<String>,
) -> Result<Json<FormEnvelope>, ApiError> {
    let form_id = parse_form_id(&form_id)?;
    let form = handlers.get.handle(GetFormQuery { form_id }).await?;
    Ok(Json(FormEnvelope::new(&form)))
}

/// PUT /api/forms/:id - Partial update by the owner
pub async fn update_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
    JsonBody(patch): JsonBody<FormPatch>,
) -> Result<Json<FormEnvelope>, ApiError> {
    let cmd = UpdateFormCommand {
        owner: user.id,
        form_id: parse_form_id(&form_id)?,
        patch,
    };

    let form = handlers.update.handle(cmd).await?;
    Ok(Json(FormEnvelope::new(&form)))
}

/// DELETE /api/forms/:id - Delete a form with its responses and insight
pub async fn delete_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = DeleteFormCommand {
        owner: user.id,
        form_id: parse_form_id(&form_id)?,
    };

    handlers.delete.handle(cmd).await?;
    Ok(Json(MessageResponse {
        message: "Form deleted successfully".to_string(),
    }))
}

/// POST /api/forms/:id/publish - Flip the published flag
pub async fn toggle_publish(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Result<Json<FormEnvelope>, ApiError> {
    let cmd = TogglePublishCommand {
        owner: user.id,
        form_id: parse_form_id(&form_id)?,
    };

    let form = handlers.toggle_publish.handle(cmd).await?;
    let message = if form.is_published() {
        "Form published"
    } else {
        "Form unpublished"
    };
    Ok(Json(FormEnvelope::new(&form).with_message(message)))
}
