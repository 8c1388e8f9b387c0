//! GraphQL response shapes and their conversion into domain records
//!
//! Everything the API may omit is `Option` here; conversion decides what an
//! absence means rather than failing deserialization.

use super::types::{
    BranchRef, CommitPage, CommitRecord, HistoryPage, Page, RepositoryEdge, UserIdentity,
};
use crate::error::{StatcardError, StatcardResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level GraphQL envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

impl<T> Envelope<T> {
    /// Reject responses carrying errors or no data.
    pub fn into_data(self, operation: &str) -> StatcardResult<T> {
        if !self.errors.is_empty() {
            let message = self
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(StatcardError::Graphql {
                operation: operation.to_string(),
                message,
            });
        }
        self.data.ok_or_else(|| StatcardError::MissingField {
            operation: operation.to_string(),
            field: "data",
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl PageInfo {
    fn next_cursor(self) -> Option<String> {
        if self.has_next_page {
            self.end_cursor
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Connection<N> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Option<Edge<N>>>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<N> {
    pub node: Option<N>,
}

impl<N> Connection<N> {
    fn into_page<T>(self, convert: impl FnMut(N) -> Option<T>) -> Page<T> {
        let items = self
            .edges
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
            .filter_map(convert)
            .collect();
        Page {
            items,
            next_cursor: self.page_info.and_then(PageInfo::next_cursor),
        }
    }
}

// User identity

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl UserData {
    pub fn into_identity(self, login: &str) -> StatcardResult<UserIdentity> {
        let user = self
            .user
            .ok_or_else(|| StatcardError::UserNotFound(login.to_string()))?;
        Ok(UserIdentity {
            id: user.id,
            created_at: user.created_at,
        })
    }
}

// Repository listings

#[derive(Debug, Deserialize)]
pub struct LanguageNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LanguageEdge {
    pub size: u64,
    pub node: Option<LanguageNode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageConnection {
    #[serde(default)]
    pub edges: Vec<Option<LanguageEdge>>,
}

impl LanguageConnection {
    fn into_sizes(self) -> Vec<(String, u64)> {
        self.edges
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node.map(|node| (node.name, edge.size)))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCount {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct CountTarget {
    /// Absent when the ref points at something other than a commit
    pub history: Option<HistoryCount>,
}

#[derive(Debug, Deserialize)]
pub struct CountRef {
    pub target: Option<CountTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name_with_owner: String,
    #[serde(default)]
    pub is_fork: bool,
    pub created_at: DateTime<Utc>,
    pub default_branch_ref: Option<CountRef>,
    pub languages: Option<LanguageConnection>,
}

impl From<RepositoryNode> for RepositoryEdge {
    fn from(node: RepositoryNode) -> Self {
        let default_branch = node
            .default_branch_ref
            .and_then(|r| r.target)
            .and_then(|t| t.history)
            .map(|h| BranchRef {
                total_commit_count: h.total_count,
            });
        RepositoryEdge {
            identity: node.name_with_owner,
            is_fork: node.is_fork,
            created_at: node.created_at,
            default_branch,
            languages: node.languages.unwrap_or_default().into_sizes(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OwnedRepositoriesData {
    pub user: Option<OwnedRepositoriesUser>,
}

#[derive(Debug, Deserialize)]
pub struct OwnedRepositoriesUser {
    pub repositories: Connection<RepositoryNode>,
}

impl OwnedRepositoriesData {
    pub fn into_page(self, login: &str) -> StatcardResult<Page<RepositoryEdge>> {
        let user = self
            .user
            .ok_or_else(|| StatcardError::UserNotFound(login.to_string()))?;
        Ok(user.repositories.into_page(|node| Some(node.into())))
    }
}

#[derive(Debug, Deserialize)]
pub struct OrganizationsData {
    pub user: Option<OrganizationsUser>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationsUser {
    pub organizations: Connection<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationNode {
    pub login: Option<String>,
    pub repositories: Connection<RepositoryNode>,
}

impl OrganizationsData {
    /// Flatten every organization's repositories into one page of edges.
    ///
    /// The returned cursor walks organizations, not repositories.
    pub fn into_page(self, login: &str) -> StatcardResult<Page<RepositoryEdge>> {
        let user = self
            .user
            .ok_or_else(|| StatcardError::UserNotFound(login.to_string()))?;
        let orgs = user.organizations.into_page(Some);

        let mut items = Vec::new();
        for org in orgs.items {
            let repos = org.repositories.into_page(|node| Some(RepositoryEdge::from(node)));
            if repos.next_cursor.is_some() {
                tracing::debug!(
                    "Organization {} has more repositories than one page; extra repositories are not listed",
                    org.login.as_deref().unwrap_or("<unknown>")
                );
            }
            items.extend(repos.items);
        }

        Ok(Page {
            items,
            next_cursor: orgs.next_cursor,
        })
    }
}

// Commit history

#[derive(Debug, Deserialize)]
pub struct AuthorUser {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommitAuthor {
    pub user: Option<AuthorUser>,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    pub author: Option<CommitAuthor>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl From<CommitNode> for CommitRecord {
    fn from(node: CommitNode) -> Self {
        CommitRecord {
            author_id: node.author.and_then(|a| a.user).and_then(|u| u.id),
            additions: node.additions,
            deletions: node.deletions,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConnection {
    pub total_count: u64,
    #[serde(flatten)]
    pub commits: Connection<CommitNode>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryTarget {
    pub history: Option<HistoryConnection>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRef {
    pub target: Option<HistoryTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRepositoryNode {
    #[serde(default)]
    pub is_fork: bool,
    pub created_at: DateTime<Utc>,
    pub languages: Option<LanguageConnection>,
    pub default_branch_ref: Option<HistoryRef>,
}

#[derive(Debug, Deserialize)]
pub struct CommitHistoryData {
    pub repository: Option<CommitRepositoryNode>,
}

impl CommitHistoryData {
    pub fn into_page(self, identity: &str) -> StatcardResult<CommitPage> {
        let repository = self.repository.ok_or_else(|| StatcardError::Graphql {
            operation: format!("commit history for {}", identity),
            message: "repository not found".to_string(),
        })?;

        let history = repository
            .default_branch_ref
            .and_then(|r| r.target)
            .and_then(|t| t.history)
            .map(|h| HistoryPage {
                total_count: h.total_count,
                commits: h.commits.into_page(|node| Some(CommitRecord::from(node))),
            });

        Ok(CommitPage {
            is_fork: repository.is_fork,
            created_at: repository.created_at,
            languages: repository.languages.unwrap_or_default().into_sizes(),
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn graphql_errors_become_error() {
        let envelope: Envelope<UserData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{"message": "Bad credentials"}, {"message": "rate limited"}]
        }))
        .unwrap();

        let err = envelope.into_data("user info").unwrap_err();
        assert!(err.to_string().contains("Bad credentials; rate limited"));
    }

    #[test]
    fn missing_user_is_not_found() {
        let data: UserData = serde_json::from_value(json!({"user": null})).unwrap();
        let err = data.into_identity("ghost").unwrap_err();
        assert!(matches!(err, StatcardError::UserNotFound(login) if login == "ghost"));
    }

    #[test]
    fn repository_listing_decodes_edges() {
        let data: OwnedRepositoriesData = serde_json::from_value(json!({
            "user": {"repositories": {
                "edges": [
                    {"node": {
                        "nameWithOwner": "octocat/hello",
                        "isFork": false,
                        "createdAt": "2020-01-01T00:00:00Z",
                        "defaultBranchRef": {"target": {"history": {"totalCount": 42}}},
                        "languages": {"edges": [
                            {"size": 500, "node": {"name": "Rust"}},
                            {"size": 20, "node": {"name": "Shell"}}
                        ]}
                    }},
                    {"node": {
                        "nameWithOwner": "octocat/empty",
                        "isFork": false,
                        "createdAt": "2021-01-01T00:00:00Z",
                        "defaultBranchRef": null,
                        "languages": {"edges": []}
                    }},
                    null
                ],
                "pageInfo": {"endCursor": "abc", "hasNextPage": true}
            }}
        }))
        .unwrap();

        let page = data.into_page("octocat").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor.as_deref(), Some("abc"));
        assert_eq!(
            page.items[0].default_branch,
            Some(BranchRef {
                total_commit_count: 42
            })
        );
        assert_eq!(
            page.items[0].languages,
            vec![("Rust".to_string(), 500), ("Shell".to_string(), 20)]
        );
        assert_eq!(page.items[1].default_branch, None);
    }

    #[test]
    fn branch_without_commit_history_is_empty() {
        let node: RepositoryNode = serde_json::from_value(json!({
            "nameWithOwner": "octocat/tagged",
            "createdAt": "2020-01-01T00:00:00Z",
            "defaultBranchRef": {"target": {}}
        }))
        .unwrap();
        let edge = RepositoryEdge::from(node);
        assert_eq!(edge.default_branch, None);
        assert!(edge.languages.is_empty());
    }

    #[test]
    fn last_page_has_no_cursor() {
        let data: OwnedRepositoriesData = serde_json::from_value(json!({
            "user": {"repositories": {
                "edges": [],
                "pageInfo": {"endCursor": "zzz", "hasNextPage": false}
            }}
        }))
        .unwrap();
        assert_eq!(data.into_page("octocat").unwrap().next_cursor, None);
    }

    #[test]
    fn organizations_flatten_repositories() {
        let repo = |name: &str| {
            json!({"node": {
                "nameWithOwner": name,
                "createdAt": "2022-03-01T00:00:00Z",
                "defaultBranchRef": {"target": {"history": {"totalCount": 1}}}
            }})
        };
        let data: OrganizationsData = serde_json::from_value(json!({
            "user": {"organizations": {
                "edges": [
                    {"node": {"login": "acme", "repositories": {
                        "edges": [repo("acme/a"), repo("acme/b")],
                        "pageInfo": {"endCursor": null, "hasNextPage": false}
                    }}},
                    {"node": {"login": "initech", "repositories": {
                        "edges": [repo("initech/c")],
                        "pageInfo": {"endCursor": null, "hasNextPage": false}
                    }}}
                ],
                "pageInfo": {"endCursor": "org-2", "hasNextPage": true}
            }}
        }))
        .unwrap();

        let page = data.into_page("octocat").unwrap();
        let names: Vec<&str> = page.items.iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(names, ["acme/a", "acme/b", "initech/c"]);
        assert_eq!(page.next_cursor.as_deref(), Some("org-2"));
    }

    #[test]
    fn commit_page_keeps_unlinked_authors_as_none() {
        let data: CommitHistoryData = serde_json::from_value(json!({
            "repository": {
                "isFork": true,
                "createdAt": "2024-06-01T00:00:00Z",
                "languages": {"edges": [{"size": 10, "node": {"name": "Go"}}]},
                "defaultBranchRef": {"target": {"history": {
                    "totalCount": 3,
                    "edges": [
                        {"node": {"additions": 5, "deletions": 1, "author": {"user": {"id": "U1"}}}},
                        {"node": {"additions": 7, "deletions": 2, "author": {"user": null}}},
                        {"node": {"additions": 9, "deletions": 3, "author": null}}
                    ],
                    "pageInfo": {"endCursor": "c1", "hasNextPage": false}
                }}}
            }
        }))
        .unwrap();

        let page = data.into_page("octocat/hello").unwrap();
        assert!(page.is_fork);
        let history = page.history.unwrap();
        assert_eq!(history.total_count, 3);
        assert_eq!(history.commits.next_cursor, None);
        let authors: Vec<Option<&str>> = history
            .commits
            .items
            .iter()
            .map(|c| c.author_id.as_deref())
            .collect();
        assert_eq!(authors, [Some("U1"), None, None]);
    }
}
