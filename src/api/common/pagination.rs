//
//  bitbucket-proxy
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination envelope for Bitbucket Cloud list responses.
//!
//! Bitbucket Cloud wraps every collection in the same envelope:
//!
//! ```json
//! {
//!   "values": [ ... ],
//!   "page": 1,
//!   "pagelen": 10,
//!   "size": 42,
//!   "next": "https://api.bitbucket.org/2.0/...&page=2"
//! }
//! ```
//!
//! The proxy passes most envelopes through untouched as raw JSON. It only
//! decodes one when it has to reshape the page, as the workspace listing does.
//!
//! # Notes
//!
//! - Only `values` is required; every other field defaults when absent
//! - Pages are never followed: one inbound request is one upstream page

use serde::Deserialize;

/// A single page of results from the Bitbucket Cloud API.
///
/// # Example
///
/// ```rust
/// use bitbucket_proxy::api::common::PaginatedResponse;
///
/// let json = r#"{"values": [1, 2, 3], "page": 1, "pagelen": 3}"#;
/// let page: PaginatedResponse<u32> = serde_json::from_str(json).unwrap();
///
/// assert_eq!(page.values, vec![1, 2, 3]);
/// assert_eq!(page.pagelen, Some(3));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page, in upstream order.
    pub values: Vec<T>,

    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,

    /// Requested page length.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when Bitbucket reports it.
    #[serde(default)]
    pub size: Option<u32>,

    /// URL of the next page.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Maps every item on the page, keeping order.
    pub fn map_values<U, F>(self, f: F) -> Vec<U>
    where
        F: FnMut(T) -> U,
    {
        self.values.into_iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_envelope() {
        let page: PaginatedResponse<String> =
            serde_json::from_str(r#"{"values": ["a", "b"]}"#).unwrap();
        assert_eq!(page.values, vec!["a", "b"]);
        assert!(page.page.is_none());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_full_envelope() {
        let json = r#"{
            "values": [],
            "page": 2,
            "pagelen": 10,
            "size": 25,
            "next": "https://api.bitbucket.org/2.0/workspaces?page=3",
            "previous": "https://api.bitbucket.org/2.0/workspaces?page=1"
        }"#;
        let page: PaginatedResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, Some(2));
        assert_eq!(page.size, Some(25));
        assert!(page.next.is_some());
    }

    #[test]
    fn test_missing_values_is_an_error() {
        let result = serde_json::from_str::<PaginatedResponse<String>>(r#"{"page": 1}"#);
        assert!(result.is_err());
    }
}
