//
//  bitbucket-proxy
//  server/handlers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Route handlers.
//!
//! Every handler has the same shape: extract the token, extract the query,
//! make one upstream call, relay the JSON.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use crate::api::cloud::{self, ListRepositoriesParams, SearchRepositoriesParams};

use super::error::ProxyError;
use super::extract::BitbucketToken;
use super::AppState;

/// `GET /api/bitbucket/repositories`
///
/// Lists a workspace's repositories when `workspace` is given, otherwise the
/// authenticated user's.
pub async fn list_repositories(
    State(state): State<Arc<AppState>>,
    BitbucketToken(credential): BitbucketToken,
    query: Result<Query<ListRepositoriesParams>, QueryRejection>,
) -> Result<Json<Value>, ProxyError> {
    let Query(params) = query?;
    let client = state.client_for(credential);

    cloud::list_repositories(&client, &params)
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("fetching repositories", e))
}

/// `GET /api/bitbucket/user`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    BitbucketToken(credential): BitbucketToken,
) -> Result<Json<Value>, ProxyError> {
    let client = state.client_for(credential);

    cloud::get_current_user(&client)
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("fetching user", e))
}

/// `GET /api/bitbucket/workspaces`
///
/// Responds with the workspace slugs only, e.g. `["team-a", "team-b"]`.
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    BitbucketToken(credential): BitbucketToken,
) -> Result<Json<Vec<String>>, ProxyError> {
    let client = state.client_for(credential);

    cloud::list_workspace_slugs(&client)
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("fetching workspaces", e))
}

/// `GET /api/bitbucket/search/repositories`
pub async fn search_repositories(
    State(state): State<Arc<AppState>>,
    BitbucketToken(credential): BitbucketToken,
    query: Result<Query<SearchRepositoriesParams>, QueryRejection>,
) -> Result<Json<Value>, ProxyError> {
    let Query(params) = query?;
    let client = state.client_for(credential);

    cloud::search_repositories(&client, &params)
        .await
        .map(Json)
        .map_err(|e| ProxyError::upstream("searching repositories", e))
}
