//
//  bitbucket-proxy
//  api/cloud/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The authenticated user.

use serde_json::Value;

use crate::api::common::ApiError;
use crate::api::BitbucketClient;

/// Fetches the user that owns the token, as returned by `GET /user`.
pub async fn get_current_user(client: &BitbucketClient) -> Result<Value, ApiError> {
    client.get(&["user"], &[]).await
}
