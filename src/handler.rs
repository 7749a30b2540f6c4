//! HTTP request handlers
//!
//! Handlers are thin adapters over [`LinkService`](crate::service::LinkService):
//! they decode the request, call the service and map the outcome to a status
//! code.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

use crate::config::AppConfig;
use crate::error::LinkError;
use crate::model::{CreateRequest, CreateResponse, ListParams};
use crate::service::{LinkService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub links: Arc<LinkService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(links: LinkService, config: AppConfig) -> Self {
        Self {
            links: Arc::new(links),
            config: Arc::new(config),
        }
    }
}

/// Creates a new short link
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page", "owner": "octocat" }
/// ```
///
/// # Response
///
/// - **201 Created** - link created
/// - **400 Bad Request** - malformed destination or owner
/// - **500 Internal Server Error** - data file could not be written
/// - **503 Service Unavailable** - no free id found
pub async fn create_short_url(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> Result<Response, LinkError> {
    let created = state
        .links
        .create(&payload.url, payload.owner.as_deref())?;

    let response = CreateResponse {
        id: created.record.id,
        url: created.url,
        destination_url: created.record.destination_url,
        created_at: created.record.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Redirects a short link to its destination
///
/// Every hit counts one access. Unknown ids go to `FALLBACK_URL` when one is
/// configured, otherwise they get a 404.
///
/// Uses 307 Temporary Redirect so browsers keep coming back and every visit
/// is counted.
pub async fn redirect_url(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.links.resolve(&id) {
        Some(record) => Redirect::temporary(&record.destination_url).into_response(),
        None => match &state.config.fallback_url {
            Some(fallback) => Redirect::temporary(fallback).into_response(),
            None => (StatusCode::NOT_FOUND, "URL not found").into_response(),
        },
    }
}

/// Returns the stored record for one link without counting an access
pub async fn link_stats(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.links.stats(&id) {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "URL not found",
                "code": "not_found"
            })),
        )
            .into_response(),
    }
}

/// Lists links with pagination, optionally filtered by owner
///
/// # Query Parameters
///
/// - `owner` (optional) - only links created for this owner
/// - `page` (optional) - page number, starts from 1 (default: 1)
/// - `limit` (optional) - items per page, max 100 (default: 10)
pub async fn list_urls(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let results = state.links.list(params.owner.as_deref(), page, limit);

    Json(json!({
        "page": page,
        "limit": limit,
        "total_fetched": results.len(),
        "data": results
    }))
    .into_response()
}
