//! Axum route handlers for the Search API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::search::criteria::{RemoteQuery, SearchCriteria};
use crate::search::pipeline::connectivity_criteria;
use crate::search::profiles::CandidateProfile;
use crate::state::AppState;

const CONNECTIVITY_LIMIT: u32 = 3;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<CandidateProfile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_params: Option<RemoteQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_candidate: Option<Option<CandidateProfile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/search
///
/// Runs one Apollo search with the given criteria. Every field is optional.
/// Remote failures answer 502 with `success: false`.
pub async fn handle_search(
    State(state): State<AppState>,
    body: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Response, AppError> {
    let search = state.search()?;
    let Json(criteria) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let result = search.run(&criteria).await;

    if result.success {
        let response = SearchResponse {
            success: true,
            total: Some(result.total),
            candidates: Some(result.profiles),
            search_params: Some(result.query),
            error: None,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    } else {
        let response = SearchResponse {
            success: false,
            candidates: None,
            total: None,
            search_params: None,
            error: result.error,
        };
        Ok((StatusCode::BAD_GATEWAY, Json(response)).into_response())
    }
}

/// GET|POST /api/test
///
/// Connectivity check: fixed minimal search, reports a sample candidate.
pub async fn handle_connection_test(State(state): State<AppState>) -> Response {
    let search = match state.search() {
        Ok(search) => search,
        Err(e) => {
            let response = ConnectionTestResponse {
                success: false,
                configured: false,
                message: None,
                test_results: None,
                sample_candidate: None,
                error: Some(not_configured_message(&e)),
            };
            return (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response();
        }
    };

    let result = search.run(&connectivity_criteria(CONNECTIVITY_LIMIT)).await;

    if result.success {
        let response = ConnectionTestResponse {
            success: true,
            configured: true,
            message: Some("Apollo API connection successful!".to_string()),
            test_results: Some(result.total),
            sample_candidate: Some(result.profiles.into_iter().next()),
            error: None,
        };
        (StatusCode::OK, Json(response)).into_response()
    } else {
        let response = ConnectionTestResponse {
            success: false,
            configured: true,
            message: None,
            test_results: None,
            sample_candidate: None,
            error: result.error,
        };
        (StatusCode::BAD_GATEWAY, Json(response)).into_response()
    }
}

fn not_configured_message(err: &AppError) -> String {
    match err {
        AppError::NotConfigured(msg) => msg.clone(),
        other => other.to_string(),
    }
}
