//
//  bitbucket-proxy
//  server/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Server
//!
//! The inbound side of the proxy: an axum router exposing the relayed
//! Bitbucket operations under [`API_PREFIX`].
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/api/bitbucket/repositories` | upstream JSON |
//! | GET | `/api/bitbucket/user` | upstream JSON |
//! | GET | `/api/bitbucket/workspaces` | JSON array of workspace slugs |
//! | GET | `/api/bitbucket/search/repositories` | upstream JSON |
//!
//! All routes require the `X-BitBucket-Token` header.
//!
//! ## Concurrency
//!
//! Requests share nothing but an immutable [`AppState`]. Upstream calls are
//! async, so a slow Bitbucket response only holds up its own request. If the
//! caller disconnects, the handler future is dropped and the in-flight
//! upstream request with it.

mod error;
mod extract;
mod handlers;

pub use error::ProxyError;
pub use extract::BitbucketToken;

use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::BitbucketClient;
use crate::auth::AuthCredential;
use crate::config::UpstreamConfig;

/// Path prefix of every proxy route.
pub const API_PREFIX: &str = "/api/bitbucket";

/// Shared application state passed to all route handlers.
pub struct AppState {
    /// Outbound client without credentials; cloned per request.
    client: BitbucketClient,
}

impl AppState {
    /// Creates the shared state around an upstream client.
    pub fn new(client: BitbucketClient) -> Arc<Self> {
        Arc::new(Self { client })
    }

    /// Creates the shared state from the upstream configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Arc<Self>> {
        Ok(Self::new(BitbucketClient::from_config(config)?))
    }

    /// Returns an upstream client carrying the caller's credential.
    pub fn client_for(&self, credential: AuthCredential) -> BitbucketClient {
        self.client.clone().with_auth(credential)
    }
}

/// Builds the full axum router.
pub fn make_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/repositories", get(handlers::list_repositories))
        .route("/user", get(handlers::get_user))
        .route("/workspaces", get(handlers::list_workspaces))
        .route("/search/repositories", get(handlers::search_repositories));

    Router::new()
        .nest(API_PREFIX, routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serves the proxy on `listener` until Ctrl-C is received.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    axum::serve(listener, make_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt as _;
    use serde_json::Value;
    use tower::ServiceExt as _;

    fn make_state() -> Arc<AppState> {
        AppState::from_config(&UpstreamConfig::default()).unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = make_router(make_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/bitbucket/pullrequests")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_routes_require_token() {
        for uri in [
            "/api/bitbucket/repositories",
            "/api/bitbucket/user",
            "/api/bitbucket/workspaces",
            "/api/bitbucket/search/repositories?query=test",
        ] {
            let app = make_router(make_state());
            let resp = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = body_json(resp).await;
            assert_eq!(json["detail"], "Missing X-BitBucket-Token header");
        }
    }

    #[tokio::test]
    async fn test_missing_token_reported_before_bad_query() {
        let app = make_router(make_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/bitbucket/search/repositories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_is_not_allowed() {
        let app = make_router(make_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/bitbucket/user")
                    .header("X-BitBucket-Token", "t")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
