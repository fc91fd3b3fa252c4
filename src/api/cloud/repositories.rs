//
//  bitbucket-proxy
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository listing and search.
//!
//! Both operations return Bitbucket's paginated repository envelope as raw
//! JSON; the proxy never decodes individual repositories.
//!
//! # Parameter Mapping
//!
//! | Inbound | Outbound | Default |
//! |---------|----------|---------|
//! | `page` | `page` | `1` |
//! | `per_page` | `pagelen` | `10` (list), `5` (search) |
//! | `sort` | `sort` | `updated_on` |
//! | `query` | `q` = `name~"<query>"` | required (search) |
//! | `workspace` | path: `repositories/{workspace}` | `user/repositories` |
//!
//! # Example
//!
//! ```rust
//! use bitbucket_proxy::api::cloud::repositories::ListRepositoriesParams;
//!
//! let params = ListRepositoriesParams {
//!     workspace: Some("my-team".to_string()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(params.resource(), vec!["repositories", "my-team"]);
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::api::common::ApiError;
use crate::api::BitbucketClient;

/// Default sort key for both listing and search.
pub const DEFAULT_SORT: &str = "updated_on";

/// Default page length for [`list_repositories`].
pub const DEFAULT_LIST_PAGELEN: i64 = 10;

/// Default page length for [`search_repositories`].
pub const DEFAULT_SEARCH_PAGELEN: i64 = 5;

/// Query parameters accepted by the repository listing.
///
/// Values are passed through without range checks; Bitbucket validates them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListRepositoriesParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page length, sent upstream as `pagelen`.
    #[serde(default = "default_list_pagelen")]
    pub per_page: i64,

    /// Sort key, e.g. `updated_on` or `-name`.
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Workspace slug or UUID. When absent or empty, the authenticated
    /// user's repositories are listed instead.
    #[serde(default)]
    pub workspace: Option<String>,
}

impl Default for ListRepositoriesParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_list_pagelen(),
            sort: default_sort(),
            workspace: None,
        }
    }
}

impl ListRepositoriesParams {
    /// Returns the workspace, treating an empty value as absent.
    pub fn workspace(&self) -> Option<&str> {
        self.workspace.as_deref().filter(|ws| !ws.is_empty())
    }

    /// Path segments of the upstream collection.
    pub fn resource(&self) -> Vec<&str> {
        match self.workspace() {
            Some(workspace) => vec!["repositories", workspace],
            None => vec!["user", "repositories"],
        }
    }

    /// Outbound query string pairs.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("pagelen", self.per_page.to_string()),
            ("sort", self.sort.clone()),
        ]
    }
}

/// Query parameters accepted by the repository search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchRepositoriesParams {
    /// Free text matched against repository names.
    pub query: String,

    /// Page length, sent upstream as `pagelen`.
    #[serde(default = "default_search_pagelen")]
    pub per_page: i64,

    /// Sort key.
    #[serde(default = "default_sort")]
    pub sort: String,
}

impl SearchRepositoriesParams {
    /// Creates search parameters with default paging and sort.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            per_page: default_search_pagelen(),
            sort: default_sort(),
        }
    }

    /// Bitbucket filter expression for a name match.
    ///
    /// The query is embedded as-is, matching what callers of the proxy
    /// already rely on.
    ///
    /// ```rust
    /// use bitbucket_proxy::api::cloud::repositories::SearchRepositoriesParams;
    ///
    /// assert_eq!(SearchRepositoriesParams::new("api").name_filter(), r#"name~"api""#);
    /// ```
    pub fn name_filter(&self) -> String {
        format!("name~\"{}\"", self.query)
    }

    /// Outbound query string pairs.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.name_filter()),
            ("pagelen", self.per_page.to_string()),
            ("sort", self.sort.clone()),
        ]
    }
}

fn default_page() -> i64 {
    1
}

fn default_list_pagelen() -> i64 {
    DEFAULT_LIST_PAGELEN
}

fn default_search_pagelen() -> i64 {
    DEFAULT_SEARCH_PAGELEN
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

/// Lists repositories of a workspace, or of the authenticated user.
pub async fn list_repositories(
    client: &BitbucketClient,
    params: &ListRepositoriesParams,
) -> Result<Value, ApiError> {
    client.get(&params.resource(), &params.to_query()).await
}

/// Searches repositories by name across everything the token can see.
pub async fn search_repositories(
    client: &BitbucketClient,
    params: &SearchRepositoriesParams,
) -> Result<Value, ApiError> {
    client.get(&["repositories"], &params.to_query()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults_target_user_repositories() {
        let params: ListRepositoriesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ListRepositoriesParams::default());
        assert_eq!(params.resource(), vec!["user", "repositories"]);
        assert_eq!(
            params.to_query(),
            vec![
                ("page", "1".to_string()),
                ("pagelen", "10".to_string()),
                ("sort", "updated_on".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_empty_workspace_is_ignored() {
        let params = ListRepositoriesParams {
            workspace: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(params.workspace(), None);
        assert_eq!(params.resource(), vec!["user", "repositories"]);
    }

    #[test]
    fn test_list_renames_per_page() {
        let params = ListRepositoriesParams {
            page: 3,
            per_page: 25,
            sort: "-name".to_string(),
            workspace: Some("acme".to_string()),
        };
        assert_eq!(params.resource(), vec!["repositories", "acme"]);
        assert_eq!(
            params.to_query(),
            vec![
                ("page", "3".to_string()),
                ("pagelen", "25".to_string()),
                ("sort", "-name".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_query() {
        let params = SearchRepositoriesParams::new("test");
        assert_eq!(
            params.to_query(),
            vec![
                ("q", r#"name~"test""#.to_string()),
                ("pagelen", "5".to_string()),
                ("sort", "updated_on".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_requires_query() {
        let result = serde_json::from_str::<SearchRepositoriesParams>(r#"{"per_page": 5}"#);
        assert!(result.is_err());
    }
}
