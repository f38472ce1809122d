//! App preview endpoint handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::documents::{conflict, not_found, parse_document, single, SharedState};
use crate::envelope::RequestDocument;
use crate::{AppPreview, CreateRequest, ResourceKind, UpdateRequest};

/// GET /appPreviews/{id}
pub async fn get_preview(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.read().await;

    match state.previews.get(&id) {
        Some(preview) => single(
            &state,
            StatusCode::OK,
            preview.clone(),
            &format!("appPreviews/{id}"),
            None,
        ),
        None => not_found(AppPreview::TYPE, &id),
    }
}

/// POST /appPreviews
pub async fn create_preview(State(state): State<SharedState>, body: Bytes) -> Response {
    let request: RequestDocument<CreateRequest<AppPreview>> = match parse_document(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let Some(attributes) = request.data.attributes else {
        return conflict(
            "ENTITY_ERROR.ATTRIBUTE.REQUIRED",
            "You must provide a value for the attribute 'fileName' with this request",
        );
    };
    let Some(relationships) = request.data.relationships else {
        return conflict(
            "ENTITY_ERROR.RELATIONSHIP.REQUIRED",
            "You must provide a value for the relationship 'appPreviewSet' with this request",
        );
    };
    if attributes.file_name.is_empty() {
        return conflict(
            "ENTITY_ERROR.ATTRIBUTE.INVALID",
            "'fileName' must not be empty",
        );
    }

    let mut state = state.write().await;
    let preview = state.create_preview(&relationships.app_preview_set.data.id, attributes);
    let self_path = format!("appPreviews/{}", preview.id);

    single(&state, StatusCode::CREATED, preview, &self_path, None)
}

/// PATCH /appPreviews/{id}
pub async fn update_preview(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let request: RequestDocument<UpdateRequest<AppPreview>> = match parse_document(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    if request.data.id != id {
        return conflict(
            "ENTITY_ERROR.ID.INVALID",
            format!(
                "The resource id '{}' does not match the path id '{id}'",
                request.data.id
            ),
        );
    }

    let mut state = state.write().await;
    let changes = request.data.attributes.unwrap_or_default();
    let updated = state.update_preview(&id, changes).cloned();

    match updated {
        Some(preview) => single(
            &state,
            StatusCode::OK,
            preview,
            &format!("appPreviews/{id}"),
            None,
        ),
        None => not_found(AppPreview::TYPE, &id),
    }
}

/// DELETE /appPreviews/{id}
pub async fn delete_preview(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let mut state = state.write().await;

    if state.delete_preview(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(AppPreview::TYPE, &id)
    }
}
