//
//  bitbucket-proxy
//  api/cloud/workspaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud workspace listing.
//!
//! Workspaces are the top-level organizational unit in Bitbucket Cloud. Each
//! has a globally unique, URL-safe slug that forms part of repository paths.
//! This is the one endpoint whose response the proxy reshapes: callers get the
//! slugs only, in the order Bitbucket returned them.
//!
//! ```text
//! {"values": [{"slug": "a", ...}, {"slug": "b", ...}]}  ->  ["a", "b"]
//! ```

use serde::Deserialize;

use crate::api::common::{ApiError, PaginatedResponse};
use crate::api::BitbucketClient;

/// The part of a Bitbucket workspace the proxy reads.
///
/// All other workspace fields (`uuid`, `name`, `links`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkspaceSlug {
    /// URL-safe identifier used in API paths and repository URLs.
    pub slug: String,
}

/// Projects a workspace page onto its slugs, preserving order.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body has no `values` list or an
/// entry has no string `slug`.
///
/// # Example
///
/// ```rust
/// use bitbucket_proxy::api::cloud::workspaces::slugs_from_page;
/// use serde_json::json;
///
/// let page = json!({"values": [{"slug": "a"}, {"slug": "b"}]});
/// assert_eq!(slugs_from_page(page).unwrap(), vec!["a", "b"]);
/// ```
pub fn slugs_from_page(page: serde_json::Value) -> Result<Vec<String>, ApiError> {
    let page: PaginatedResponse<WorkspaceSlug> = serde_json::from_value(page)?;
    Ok(page.map_values(|workspace| workspace.slug))
}

/// Lists the slugs of the workspaces the token can access.
pub async fn list_workspace_slugs(client: &BitbucketClient) -> Result<Vec<String>, ApiError> {
    let page = client.get(&["workspaces"], &[]).await?;
    slugs_from_page(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugs_preserve_order() {
        let page = json!({
            "values": [
                {"slug": "workspace2", "name": "Second", "uuid": "{2}"},
                {"slug": "workspace1", "name": "First", "uuid": "{1}"}
            ],
            "pagelen": 10
        });
        assert_eq!(
            slugs_from_page(page).unwrap(),
            vec!["workspace2", "workspace1"]
        );
    }

    #[test]
    fn test_empty_page() {
        assert!(slugs_from_page(json!({"values": []})).unwrap().is_empty());
    }

    #[test]
    fn test_missing_values_is_decode_error() {
        let err = slugs_from_page(json!({"type": "error"})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_missing_slug_is_decode_error() {
        let err = slugs_from_page(json!({"values": [{"name": "no slug"}]})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
