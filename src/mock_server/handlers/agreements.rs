//! Beta license agreement endpoint handlers.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::documents::{
    check_include, conflict, internal_error, invalid_parameter, link_with_query, linked,
    not_found, parse_document, single, split_list, QueryParams, SharedState,
};
use crate::envelope::{
    IncludedResource, PagedDocumentLinks, Paging, PagingInformation, RequestDocument,
};
use crate::mock_server::state::MockState;
use crate::{App, BetaLicenseAgreement, ListDocument, Resource, ResourceKind, UpdateRequest};

/// Page size when the request has no `limit`.
const DEFAULT_LIMIT: usize = 50;

/// Largest `limit` the endpoint accepts.
const MAX_LIMIT: usize = 200;

/// Apply `fields[betaLicenseAgreements]`: drop members that were not selected.
fn select_fields(
    mut agreement: Resource<BetaLicenseAgreement>,
    fields: &[String],
) -> Resource<BetaLicenseAgreement> {
    if fields.is_empty() {
        return agreement;
    }
    if !fields.iter().any(|f| f == "agreementText") {
        agreement.attributes = None;
    }
    if !fields.iter().any(|f| f == "app") {
        agreement.relationships = None;
    }
    agreement
}

/// Apps referenced by `agreements`, each once, in first-seen order.
fn included_apps<'a>(
    state: &MockState,
    agreements: impl Iterator<Item = &'a Resource<BetaLicenseAgreement>>,
) -> Result<Vec<IncludedResource>, Response> {
    let mut seen: Vec<&str> = Vec::new();
    let mut included = Vec::new();
    for agreement in agreements {
        let Some(app_id) = agreement.app_id() else {
            continue;
        };
        if seen.contains(&app_id) {
            continue;
        }
        seen.push(app_id);
        if let Some(app) = state.apps.get(app_id) {
            let resource = IncludedResource::try_from(linked(state, app.clone()))
                .map_err(|e| internal_error(e.to_string()))?;
            included.push(resource);
        }
    }
    Ok(included)
}

/// GET /betaLicenseAgreements
pub async fn list_agreements(
    State(state): State<SharedState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let state = state.read().await;

    let include = match check_include(&params, &["app"]) {
        Ok(include) => include,
        Err(response) => return response,
    };

    let limit = match params.get("limit") {
        None => DEFAULT_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if (1..=MAX_LIMIT).contains(&n) => n,
            _ => return invalid_parameter("limit", raw),
        },
    };

    let offset = match params.get("cursor") {
        None => 0,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => n,
            Err(_) => return invalid_parameter("cursor", raw),
        },
    };

    let all = state.list_agreements(&split_list(&params, "filter[app]"));
    let total = all.len();
    if offset > total {
        if let Some(raw) = params.get("cursor") {
            return invalid_parameter("cursor", raw);
        }
    }
    let end = offset.saturating_add(limit).min(total);
    let page = all.get(offset..end).unwrap_or_default();

    // Sideload from the full records, before field selection drops linkage.
    let included = match include
        .iter()
        .any(|i| i == "app")
        .then(|| included_apps(&state, page.iter().copied()))
        .transpose()
    {
        Ok(included) => included,
        Err(response) => return response,
    };

    let fields = split_list(&params, "fields[betaLicenseAgreements]");
    let data: Vec<_> = page
        .iter()
        .map(|a| linked(&state, select_fields((*a).clone(), &fields)))
        .collect();

    let path = BetaLicenseAgreement::TYPE;
    let base_pairs: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| k.as_str() != "cursor")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let next = (end < total).then(|| {
        let mut pairs = base_pairs.clone();
        pairs.retain(|(k, _)| k != "limit");
        pairs.push(("cursor".to_string(), end.to_string()));
        pairs.push(("limit".to_string(), limit.to_string()));
        link_with_query(&state, path, pairs)
    });

    let document = ListDocument::<BetaLicenseAgreement> {
        data,
        included,
        links: PagedDocumentLinks {
            self_link: link_with_query(&state, path, params.clone().into_iter().collect()),
            first: Some(link_with_query(&state, path, base_pairs)),
            next,
            prev: None,
        },
        meta: Some(PagingInformation {
            paging: Paging {
                total: total as u32,
                limit: limit as u32,
            },
        }),
    };

    (StatusCode::OK, Json(document)).into_response()
}

/// GET /betaLicenseAgreements/{id}
pub async fn get_agreement(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Response {
    let state = state.read().await;

    let include = match check_include(&params, &["app"]) {
        Ok(include) => include,
        Err(response) => return response,
    };

    let Some(agreement) = state.agreements.get(&id) else {
        return not_found(BetaLicenseAgreement::TYPE, &id);
    };

    let included = match include
        .iter()
        .any(|i| i == "app")
        .then(|| included_apps(&state, std::iter::once(agreement)))
        .transpose()
    {
        Ok(included) => included,
        Err(response) => return response,
    };
    let fields = split_list(&params, "fields[betaLicenseAgreements]");

    single(
        &state,
        StatusCode::OK,
        select_fields(agreement.clone(), &fields),
        &format!("betaLicenseAgreements/{id}"),
        included,
    )
}

/// PATCH /betaLicenseAgreements/{id}
pub async fn update_agreement(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let request: RequestDocument<UpdateRequest<BetaLicenseAgreement>> =
        match parse_document(&body) {
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
    let agreement_text = request.data.attributes.and_then(|a| a.agreement_text);

    let updated = state.update_agreement(&id, agreement_text).cloned();

    match updated {
        Some(agreement) => single(
            &state,
            StatusCode::OK,
            agreement,
            &format!("betaLicenseAgreements/{id}"),
            None,
        ),
        None => not_found(BetaLicenseAgreement::TYPE, &id),
    }
}

/// GET /betaLicenseAgreements/{id}/app
pub async fn get_agreement_app(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;

    if !state.agreements.contains_key(&id) {
        return not_found(BetaLicenseAgreement::TYPE, &id);
    }

    match state.app_for_agreement(&id) {
        Some(app) => single(
            &state,
            StatusCode::OK,
            app.clone(),
            &format!("betaLicenseAgreements/{id}/app"),
            None,
        ),
        None => not_found(App::TYPE, "(unlinked)"),
    }
}

/// GET /apps/{id}/betaLicenseAgreement
pub async fn get_app_agreement(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<QueryParams>,
) -> Response {
    let state = state.read().await;

    if !state.apps.contains_key(&id) {
        return not_found(App::TYPE, &id);
    }

    let fields = split_list(&params, "fields[betaLicenseAgreements]");
    match state.agreement_for_app(&id) {
        Some(agreement) => single(
            &state,
            StatusCode::OK,
            select_fields(agreement.clone(), &fields),
            &format!("apps/{id}/betaLicenseAgreement"),
            None,
        ),
        None => not_found(BetaLicenseAgreement::TYPE, &format!("(app {id})")),
    }
}
