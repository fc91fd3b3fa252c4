//
//  bitbucket-proxy
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 operations relayed by the proxy.
//!
//! Each submodule exposes one async function per upstream call, taking a
//! [`BitbucketClient`](super::BitbucketClient) that already carries the
//! caller's credential.
//!
//! - [`repositories`] - Repository listing and name search
//! - [`user`] - The authenticated user
//! - [`workspaces`] - Workspace slugs
//!
//! # Notes
//!
//! - Responses are relayed as raw JSON except for workspaces
//! - Exactly one upstream request is made per call; pages are not followed

pub mod repositories;
pub mod user;
pub mod workspaces;

pub use repositories::{
    list_repositories, search_repositories, ListRepositoriesParams, SearchRepositoriesParams,
};
pub use user::get_current_user;
pub use workspaces::list_workspace_slugs;
