//! JSON:API response bodies shared by all handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::envelope::{to_query_string, DocumentLinks, IncludedResource};
use crate::mock_server::state::MockState;
use crate::{ErrorObject, ErrorResponse, ErrorSource, Resource, ResourceKind, SingleDocument};

/// State handle every handler extracts.
pub type SharedState = Arc<RwLock<MockState>>;

/// Raw query parameters, keyed as sent (`fields[apps]`, `filter[app]`, ...).
pub type QueryParams = HashMap<String, String>;

fn error_object(status: StatusCode, code: &str, title: &str, detail: String) -> ErrorObject {
    ErrorObject {
        id: Some(format!("mock-{}", status.as_u16())),
        status: status.as_u16().to_string(),
        code: code.to_string(),
        title: title.to_string(),
        detail,
        source: None,
    }
}

/// A JSON:API error body with a single error object.
pub fn error_response(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
) -> Response {
    let body = ErrorResponse {
        errors: vec![error_object(status, code, title, detail.into())],
    };
    (status, Json(body)).into_response()
}

pub fn not_found(kind: &str, id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        "The specified resource does not exist",
        format!("There is no resource of type '{kind}' with id '{id}'"),
    )
}

/// 400 naming the offending query parameter in `source.parameter`.
pub fn invalid_parameter(name: &str, value: &str) -> Response {
    let mut error = error_object(
        StatusCode::BAD_REQUEST,
        "PARAMETER_ERROR.INVALID",
        "A parameter has an invalid value",
        format!("'{value}' is not a valid value for '{name}'"),
    );
    error.source = Some(ErrorSource {
        pointer: None,
        parameter: Some(name.to_string()),
    });
    let body = ErrorResponse {
        errors: vec![error],
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

pub fn conflict(code: &str, detail: impl Into<String>) -> Response {
    error_response(
        StatusCode::CONFLICT,
        code,
        "The provided entity is invalid",
        detail,
    )
}

pub fn internal_error(detail: impl Into<String>) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "UNEXPECTED_ERROR",
        "An unexpected error occurred",
        detail,
    )
}

/// Decode a request document, answering 409 when it does not fit.
pub fn parse_document<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Response> {
    serde_json::from_slice(bytes).map_err(|e| conflict("ENTITY_ERROR", e.to_string()))
}

/// Comma-separated values of a query parameter.
pub fn split_list(params: &QueryParams, key: &str) -> Vec<String> {
    params
        .get(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Reject `include` values outside `allowed`.
pub fn check_include(params: &QueryParams, allowed: &[&str]) -> Result<Vec<String>, Response> {
    let include = split_list(params, "include");
    match include.iter().find(|i| !allowed.contains(&i.as_str())) {
        Some(bad) => Err(invalid_parameter("include", bad)),
        None => Ok(include),
    }
}

/// Attach the resource's own `links.self`.
pub fn linked<K: ResourceKind>(state: &MockState, resource: Resource<K>) -> Resource<K> {
    let url = state.link(&format!("{}/{}", K::TYPE, resource.id));
    resource.with_self_link(url)
}

/// Absolute URL of `path` with the given query pairs, sorted for stable output.
pub fn link_with_query(state: &MockState, path: &str, mut pairs: Vec<(String, String)>) -> String {
    if pairs.is_empty() {
        return state.link(path);
    }
    pairs.sort();
    state.link(&format!("{path}?{}", to_query_string(&pairs)))
}

/// A single-resource document response.
pub fn single<K: ResourceKind>(
    state: &MockState,
    status: StatusCode,
    resource: Resource<K>,
    self_path: &str,
    included: Option<Vec<IncludedResource>>,
) -> Response {
    let document = SingleDocument {
        data: linked(state, resource),
        included,
        links: DocumentLinks {
            self_link: state.link(self_path),
        },
    };
    (status, Json(document)).into_response()
}
