//! Entity handlers, written once and instantiated per entity.
//!
//! Each operation parses its input, validates contact fields where the
//! entity carries them, performs exactly one RPC and maps the outcome.
//! Input errors never reach the backend.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use tonic::Status;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::rpc::{AssignId, Entity};
use crate::validation::validate_contact;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw list query. Numbers stay strings until [`ListParams::pagination`]
/// so a bad value becomes our 400 rather than an extractor rejection.
#[derive(Debug, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Collects the known keys from decoded query pairs. When a key repeats,
    /// the first occurrence is kept; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut params.search,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// `(page, limit)`, defaulting to 1 and 10.
    pub fn pagination(&self) -> Result<(u64, u64), ApiError> {
        let page = parse_unsigned(self.page.as_deref(), DEFAULT_PAGE, "page")?;
        let limit = parse_unsigned(self.limit.as_deref(), DEFAULT_LIMIT, "limit")?;
        Ok((page, limit))
    }
}

/// Decimal digits only. `str::parse` would also take a leading `+`.
fn parse_unsigned(raw: Option<&str>, default: u64, name: &str) -> Result<u64, ApiError> {
    let description = || format!("error while parsing {name}");
    match raw {
        None => Ok(default),
        Some(value) if value.bytes().all(|b| b.is_ascii_digit()) => value
            .parse::<u64>()
            .map_err(|e| ApiError::bad_request(description(), e)),
        Some(value) => Err(ApiError::bad_request(
            description(),
            format!("invalid digit in {value:?}"),
        )),
    }
}

/// `GET /` liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({ "data": "Api gateway" }))
}

pub async fn create<E: Entity>(
    State(state): State<AppState>,
    body: Result<Json<E::Create>, JsonRejection>,
) -> Result<Json<E>, ApiError> {
    let Json(request) = body.map_err(invalid_body::<E>)?;
    validate_contact(&request).map_err(|e| rejected::<E>("create", e.into()))?;

    E::service(&state.client)
        .create(request)
        .await
        .map(Json)
        .map_err(|status| upstream::<E>("create", status))
}

pub async fn list<E: Entity>(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<E::ListResponse>, ApiError> {
    let Query(pairs) = query.map_err(invalid_query::<E>)?;
    let params = ListParams::from_pairs(pairs);
    let (page, limit) = params
        .pagination()
        .map_err(|e| rejected::<E>("list", e))?;
    let request = E::list_request(params.search.unwrap_or_default(), page, limit);

    E::service(&state.client)
        .get_list(request)
        .await
        .map(Json)
        .map_err(|status| upstream::<E>("list", status))
}

pub async fn get_by_id<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E>, ApiError> {
    E::service(&state.client)
        .get_by_id(E::primary_key(id))
        .await
        .map(Json)
        .map_err(|status| upstream::<E>("get", status))
}

pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<E::Update>, JsonRejection>,
) -> Result<Json<E>, ApiError> {
    let Json(mut request) = body.map_err(invalid_body::<E>)?;
    validate_contact(&request).map_err(|e| rejected::<E>("update", e.into()))?;
    // The path wins over any id in the body.
    request.assign_id(id);

    E::service(&state.client)
        .update(request)
        .await
        .map(Json)
        .map_err(|status| upstream::<E>("update", status))
}

pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E::Empty>, ApiError> {
    E::service(&state.client)
        .delete(E::primary_key(id))
        .await
        .map(Json)
        .map_err(|status| upstream::<E>("delete", status))
}

fn invalid_body<E: Entity>(rejection: JsonRejection) -> ApiError {
    tracing::warn!(
        entity = E::NAME,
        error = %rejection.body_text(),
        "invalid request body"
    );
    ApiError::bad_request("invalid request body", rejection.body_text())
}

fn invalid_query<E: Entity>(rejection: QueryRejection) -> ApiError {
    tracing::warn!(
        entity = E::NAME,
        error = %rejection.body_text(),
        "invalid query string"
    );
    ApiError::bad_request("invalid query string", rejection.body_text())
}

fn rejected<E: Entity>(operation: &'static str, err: ApiError) -> ApiError {
    tracing::warn!(entity = E::NAME, operation, error = %err, "request rejected");
    err
}

fn upstream<E: Entity>(operation: &'static str, status: Status) -> ApiError {
    tracing::error!(
        entity = E::NAME,
        operation,
        code = ?status.code(),
        detail = status.message(),
        "rpc failed"
    );
    ApiError::upstream(format!("failed to {operation} {}", E::NAME), status)
}
