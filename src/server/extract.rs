//
//  bitbucket-proxy
//  server/extract.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{token_from_headers, AuthCredential};

use super::error::ProxyError;

/// The caller's Bitbucket credential, taken from the `X-BitBucket-Token`
/// header.
///
/// Rejects with [`ProxyError::MissingToken`] (HTTP 400) when the header is
/// absent or empty. Handlers list it before any other extractor that can
/// fail, so a missing token is always reported first and no upstream call is
/// attempted.
#[derive(Debug, Clone)]
pub struct BitbucketToken(pub AuthCredential);

impl<S> FromRequestParts<S> for BitbucketToken
where
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        token_from_headers(&parts.headers)
            .map(Self)
            .ok_or(ProxyError::MissingToken)
    }
}
