//! App Store version submission endpoint handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::documents::{conflict, not_found, parse_document, single, SharedState};
use crate::envelope::RequestDocument;
use crate::mock_server::state::StateError;
use crate::{AppStoreVersion, AppStoreVersionSubmission, CreateRequest, ResourceKind};

/// POST /appStoreVersionSubmissions
pub async fn create_submission(State(state): State<SharedState>, body: Bytes) -> Response {
    let request: RequestDocument<CreateRequest<AppStoreVersionSubmission>> =
        match parse_document(&body) {
            Ok(request) => request,
            Err(response) => return response,
        };

    let Some(relationships) = request.data.relationships else {
        return conflict(
            "ENTITY_ERROR.RELATIONSHIP.REQUIRED",
            "You must provide a value for the relationship 'appStoreVersion' with this request",
        );
    };
    let version = relationships.app_store_version.data;
    if !version.is::<AppStoreVersion>() {
        return conflict(
            "ENTITY_ERROR.RELATIONSHIP.INVALID",
            format!("'{}' is not a valid type for 'appStoreVersion'", version.kind),
        );
    }

    let mut state = state.write().await;
    match state.create_submission(&version.id) {
        Ok(submission) => {
            let self_path = format!("appStoreVersionSubmissions/{}", submission.id);
            single(&state, StatusCode::CREATED, submission, &self_path, None)
        }
        Err(StateError::NotFound { id, .. }) => conflict(
            "ENTITY_ERROR.RELATIONSHIP.INVALID",
            format!("There is no resource of type 'appStoreVersions' with id '{id}'"),
        ),
        Err(StateError::Conflict(detail)) => conflict("STATE_ERROR", detail),
    }
}

/// DELETE /appStoreVersionSubmissions/{id}
pub async fn delete_submission(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;

    if state.delete_submission(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(AppStoreVersionSubmission::TYPE, &id)
    }
}

/// GET /appStoreVersions/{id}/appStoreVersionSubmission
pub async fn get_version_submission(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;

    if !state.versions.contains_key(&id) {
        return not_found(AppStoreVersion::TYPE, &id);
    }

    match state.submission_for_version(&id) {
        Some(submission) => single(
            &state,
            StatusCode::OK,
            submission.clone(),
            &format!("appStoreVersions/{id}/appStoreVersionSubmission"),
            None,
        ),
        None => not_found(AppStoreVersionSubmission::TYPE, &format!("(version {id})")),
    }
}
