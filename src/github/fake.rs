//! Scripted `GithubApi` used by unit tests
//!
//! Pages are served by position; page `i` of a listing is requested with
//! cursor `c{i}` and advertises `c{i+1}` unless it is the last scripted page.

use super::types::{
    BranchRef, CommitPage, CommitRecord, HistoryPage, Page, RepositoryEdge, UserIdentity,
};
use super::{Affiliation, GithubApi};
use crate::error::{StatcardError, StatcardResult};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

type Scripted<T> = Vec<Result<T, String>>;

#[derive(Default)]
pub struct FakeGithub {
    identity: Option<Result<UserIdentity, String>>,
    owned: Scripted<Vec<RepositoryEdge>>,
    orgs: Scripted<Vec<RepositoryEdge>>,
    commits: HashMap<String, Scripted<CommitPage>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGithub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, identity: Result<UserIdentity, String>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_owned_pages(mut self, pages: Scripted<Vec<RepositoryEdge>>) -> Self {
        self.owned = pages;
        self
    }

    pub fn with_org_pages(mut self, pages: Scripted<Vec<RepositoryEdge>>) -> Self {
        self.orgs = pages;
        self
    }

    pub fn with_commit_pages(mut self, identity: &str, pages: Scripted<CommitPage>) -> Self {
        self.commits.insert(identity.to_string(), pages);
        self
    }

    /// Calls made so far, e.g. `owned:-`, `commits:me/a:c1`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of commit-history requests made for one repository
    pub fn commit_calls(&self, identity: &str) -> usize {
        let prefix = format!("commits:{}:", identity);
        self.calls().iter().filter(|c| c.starts_with(&prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn position(cursor: Option<&str>) -> usize {
    cursor
        .and_then(|c| c.strip_prefix('c'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn next_cursor<T>(script: &Scripted<T>, index: usize) -> Option<String> {
    (index + 1 < script.len()).then(|| format!("c{}", index + 1))
}

fn serve<T: Clone>(operation: &str, script: &Scripted<T>, cursor: Option<&str>) -> StatcardResult<(T, Option<String>)> {
    let index = position(cursor);
    match script.get(index) {
        Some(Ok(value)) => Ok((value.clone(), next_cursor(script, index))),
        Some(Err(reason)) => Err(StatcardError::http(operation, reason)),
        None => Err(StatcardError::http(operation, "no scripted page")),
    }
}

#[async_trait]
impl GithubApi for FakeGithub {
    async fn user_identity(&self, login: &str) -> StatcardResult<UserIdentity> {
        self.record(format!("user:{}", login));
        match &self.identity {
            Some(Ok(identity)) => Ok(identity.clone()),
            Some(Err(reason)) => Err(StatcardError::http("user info", reason)),
            None => Err(StatcardError::UserNotFound(login.to_string())),
        }
    }

    async fn repository_page(
        &self,
        _login: &str,
        _affiliations: &[Affiliation],
        cursor: Option<&str>,
    ) -> StatcardResult<Page<RepositoryEdge>> {
        self.record(format!("owned:{}", cursor.unwrap_or("-")));
        let (items, next_cursor) = serve("repository listing", &self.owned, cursor)?;
        Ok(Page { items, next_cursor })
    }

    async fn organization_page(
        &self,
        _login: &str,
        cursor: Option<&str>,
    ) -> StatcardResult<Page<RepositoryEdge>> {
        self.record(format!("orgs:{}", cursor.unwrap_or("-")));
        let (items, next_cursor) = serve("organization listing", &self.orgs, cursor)?;
        Ok(Page { items, next_cursor })
    }

    async fn commit_page(
        &self,
        name: &str,
        owner: &str,
        cursor: Option<&str>,
    ) -> StatcardResult<CommitPage> {
        let identity = format!("{}/{}", owner, name);
        self.record(format!("commits:{}:{}", identity, cursor.unwrap_or("-")));
        let script = self
            .commits
            .get(&identity)
            .ok_or_else(|| StatcardError::http("commit history", "unknown repository"))?;
        let (mut page, next) = serve("commit history", script, cursor)?;
        if let Some(history) = page.history.as_mut() {
            history.commits.next_cursor = next;
        }
        Ok(page)
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn identity(id: &str) -> UserIdentity {
    UserIdentity {
        id: id.to_string(),
        created_at: at(2019, 3, 1),
    }
}

/// Non-fork repository edge with a default branch
pub fn repo_edge(identity: &str, total_commits: u64) -> RepositoryEdge {
    RepositoryEdge {
        identity: identity.to_string(),
        is_fork: false,
        created_at: at(2020, 1, 1),
        default_branch: Some(BranchRef {
            total_commit_count: total_commits,
        }),
        languages: vec![],
    }
}

pub fn commit(author: Option<&str>, additions: u64, deletions: u64) -> CommitRecord {
    CommitRecord {
        author_id: author.map(str::to_string),
        additions,
        deletions,
    }
}

pub fn commit_page(total_count: u64, commits: Vec<CommitRecord>) -> CommitPage {
    CommitPage {
        is_fork: false,
        created_at: at(2020, 1, 1),
        languages: vec![],
        history: Some(HistoryPage {
            total_count,
            commits: Page::last(commits),
        }),
    }
}

pub fn langs(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
}
