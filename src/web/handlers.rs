//! HTTP request handlers

use super::state::AppState;
use crate::backends::RepoConfig;
use crate::results::{SearchResponse, Stats};
use crate::search::params::{parse_as_bool, parse_as_repo_list, parse_search_options};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// Search results response
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchBody {
    pub results: HashMap<String, SearchResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

/// `{"Error": "..."}` with the given status
fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message: String = message.into();
    (status, Json(serde_json::json!({ "Error": message }))).into_response()
}

/// Repository listing handler
pub async fn repos(State(state): State<AppState>) -> impl IntoResponse {
    let repos: BTreeMap<String, RepoConfig> = state
        .registry
        .repos()
        .into_iter()
        .map(|(name, repo)| (name.to_string(), repo.clone()))
        .collect();
    Json(repos)
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(form): Query<HashMap<String, String>>,
) -> Response {
    let value = |key: &str| form.get(key).map(String::as_str).unwrap_or("");

    let stats = parse_as_bool(value("stats"));
    let repos = parse_as_repo_list(value("repos"), &state.registry);
    let pattern = state.compiler.compile(value("q"));
    let options = parse_search_options(&form, &state.settings.search);

    match state.dispatcher.search_all(&pattern, &options, &repos).await {
        Ok(results) => Json(SearchBody {
            results: results.results,
            stats: stats.then_some(results.stats),
        })
        .into_response(),
        // Clients expect a 200 even when a backend fails.
        Err(e) => error_response(StatusCode::OK, e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct ExcludesParams {
    #[serde(default)]
    pub repo: String,
}

/// Excluded files handler
pub async fn excludes(
    State(state): State<AppState>,
    Query(params): Query<ExcludesParams>,
) -> Response {
    let Some(backend) = state.registry.get(&params.repo) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("No such repository: {}", params.repo),
        );
    };

    match backend.excluded_files().await {
        Ok(files) => (
            [(header::CONTENT_TYPE, "application/json;charset=utf-8")],
            files,
        )
            .into_response(),
        Err(e) => error_response(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    #[serde(default)]
    pub repos: String,
}

/// Push-update handler
pub async fn update(State(state): State<AppState>, Form(params): Form<UpdateParams>) -> Response {
    let repos: Vec<String> = if params.repos.trim() == "*" {
        state.registry.names().into_iter().map(str::to_string).collect()
    } else {
        params
            .repos
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    };

    for repo in &repos {
        if let Err(response) = update_repo(&state, repo).await {
            return response;
        }
    }

    Json("ok").into_response()
}

#[derive(Debug, Deserialize)]
pub struct Webhook {
    #[serde(default)]
    pub repository: WebhookRepository,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookRepository {
    #[serde(default)]
    pub full_name: String,
}

/// GitHub push webhook handler
pub async fn github_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let hook: Webhook = match serde_json::from_slice(&body) {
        Ok(hook) => hook,
        Err(e) => {
            warn!("Rejecting malformed webhook: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Bad Request");
        }
    };

    match update_repo(&state, &hook.repository.full_name).await {
        Ok(()) => Json("ok").into_response(),
        Err(response) => response,
    }
}

/// Ask one repository's backend to reindex
async fn update_repo(state: &AppState, repo: &str) -> Result<(), Response> {
    let Some(backend) = state.registry.get(repo) else {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("No such repository: {}", repo),
        ));
    };

    match backend.update().await {
        Ok(true) => {
            info!("Update triggered for {}", repo);
            Ok(())
        }
        Ok(false) => Err(error_response(
            StatusCode::FORBIDDEN,
            format!("Push updates are not enabled for repository {}", repo),
        )),
        Err(e) => {
            warn!("Update failed for {}: {}", repo, e);
            Err(error_response(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
