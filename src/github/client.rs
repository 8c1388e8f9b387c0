//! HTTP transport for the GitHub GraphQL API

use super::counters::{QueryCounters, QueryKind, QueryTally};
use super::types::{Affiliation, CommitPage, Page, RepositoryEdge, UserIdentity};
use super::wire::{
    CommitHistoryData, Envelope, OrganizationsData, OwnedRepositoriesData, UserData,
};
use super::GithubApi;
use crate::config::Settings;
use crate::error::{StatcardError, StatcardResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("statcard/", env!("CARGO_PKG_VERSION"));

const USER_QUERY: &str = r#"
query ($login: String!) {
  user(login: $login) {
    id
    createdAt
  }
}
"#;

const REPOSITORIES_QUERY: &str = r#"
query ($login: String!, $affiliations: [RepositoryAffiliation], $cursor: String, $pageSize: Int!, $languageCount: Int!) {
  user(login: $login) {
    repositories(first: $pageSize, after: $cursor, ownerAffiliations: $affiliations) {
      edges {
        node {
          ... on Repository {
            nameWithOwner
            isFork
            createdAt
            languages(first: $languageCount, orderBy: {field: SIZE, direction: DESC}) {
              edges { size node { name } }
            }
            defaultBranchRef {
              target {
                ... on Commit { history { totalCount } }
              }
            }
          }
        }
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

const ORGANIZATIONS_QUERY: &str = r#"
query ($login: String!, $cursor: String, $pageSize: Int!, $languageCount: Int!) {
  user(login: $login) {
    organizations(first: $pageSize, after: $cursor) {
      edges {
        node {
          login
          repositories(first: $pageSize) {
            edges {
              node {
                ... on Repository {
                  nameWithOwner
                  isFork
                  createdAt
                  languages(first: $languageCount, orderBy: {field: SIZE, direction: DESC}) {
                    edges { size node { name } }
                  }
                  defaultBranchRef {
                    target {
                      ... on Commit { history { totalCount } }
                    }
                  }
                }
              }
            }
            pageInfo { endCursor hasNextPage }
          }
        }
      }
      pageInfo { endCursor hasNextPage }
    }
  }
}
"#;

const COMMITS_QUERY: &str = r#"
query ($name: String!, $owner: String!, $cursor: String, $pageSize: Int!, $languageCount: Int!) {
  repository(name: $name, owner: $owner) {
    isFork
    createdAt
    languages(first: $languageCount, orderBy: {field: SIZE, direction: DESC}) {
      edges { size node { name } }
    }
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $pageSize, after: $cursor) {
            totalCount
            edges {
              node {
                author { user { id } }
                additions
                deletions
              }
            }
            pageInfo { endCursor hasNextPage }
          }
        }
      }
    }
  }
}
"#;

/// Transport settings
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub token: String,
    pub timeout: Duration,
    pub listing_page_size: u32,
    pub history_page_size: u32,
    pub languages_per_repo: u32,
}

impl From<&Settings> for ClientOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            token: settings.token.clone(),
            timeout: settings.timeout,
            listing_page_size: settings.listing_page_size,
            history_page_size: settings.history_page_size,
            languages_per_repo: settings.languages_per_repo,
        }
    }
}

/// GraphQL client backed by a blocking `ureq` agent
///
/// Requests run on the blocking thread pool. Retries are left to callers.
pub struct GithubClient {
    agent: ureq::Agent,
    options: ClientOptions,
    tally: QueryTally,
}

impl GithubClient {
    pub fn new(options: ClientOptions) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(options.timeout))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            options,
            tally: QueryTally::default(),
        }
    }

    /// Queries issued so far by this client
    pub fn counters(&self) -> QueryCounters {
        self.tally.snapshot()
    }

    async fn execute<T>(&self, kind: QueryKind, query: &'static str, variables: Value) -> StatcardResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.tally.record(kind);
        debug!("GraphQL {} query with {}", kind, variables);

        let body = serde_json::to_string(&json!({ "query": query, "variables": variables }))?;
        let agent = self.agent.clone();
        let endpoint = self.options.endpoint.clone();
        let authorization = format!("bearer {}", self.options.token);

        let response = tokio::task::spawn_blocking(move || -> Result<String, ureq::Error> {
            let mut response = agent
                .post(endpoint.as_str())
                .header("Authorization", authorization.as_str())
                .header("Content-Type", "application/json")
                .header("User-Agent", USER_AGENT)
                .send(body.as_str())?;
            response.body_mut().read_to_string()
        })
        .await
        .map_err(|e| StatcardError::Internal(format!("{} request task failed: {}", kind, e)))?
        .map_err(|e| StatcardError::http(kind.to_string(), e))?;

        let envelope: Envelope<T> = serde_json::from_str(&response)?;
        envelope.into_data(&kind.to_string())
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn user_identity(&self, login: &str) -> StatcardResult<UserIdentity> {
        let data: UserData = self
            .execute(QueryKind::UserInfo, USER_QUERY, json!({ "login": login }))
            .await?;
        data.into_identity(login)
    }

    async fn repository_page(
        &self,
        login: &str,
        affiliations: &[Affiliation],
        cursor: Option<&str>,
    ) -> StatcardResult<Page<RepositoryEdge>> {
        let affiliations: Vec<String> = affiliations.iter().map(|a| a.to_string()).collect();
        let data: OwnedRepositoriesData = self
            .execute(
                QueryKind::Edges,
                REPOSITORIES_QUERY,
                json!({
                    "login": login,
                    "affiliations": affiliations,
                    "cursor": cursor,
                    "pageSize": self.options.listing_page_size,
                    "languageCount": self.options.languages_per_repo,
                }),
            )
            .await?;
        data.into_page(login)
    }

    async fn organization_page(
        &self,
        login: &str,
        cursor: Option<&str>,
    ) -> StatcardResult<Page<RepositoryEdge>> {
        let data: OrganizationsData = self
            .execute(
                QueryKind::OrgEdges,
                ORGANIZATIONS_QUERY,
                json!({
                    "login": login,
                    "cursor": cursor,
                    "pageSize": self.options.listing_page_size,
                    "languageCount": self.options.languages_per_repo,
                }),
            )
            .await?;
        data.into_page(login)
    }

    async fn commit_page(
        &self,
        name: &str,
        owner: &str,
        cursor: Option<&str>,
    ) -> StatcardResult<CommitPage> {
        let data: CommitHistoryData = self
            .execute(
                QueryKind::RepoInfo,
                COMMITS_QUERY,
                json!({
                    "name": name,
                    "owner": owner,
                    "cursor": cursor,
                    "pageSize": self.options.history_page_size,
                    "languageCount": self.options.languages_per_repo,
                }),
            )
            .await?;
        data.into_page(&format!("{}/{}", owner, name))
    }
}
