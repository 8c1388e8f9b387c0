//! Cursor-driven page streams
//!
//! Each listing is exposed as a lazy [`Stream`] of pages produced by an
//! explicit cursor loop. A stream ends after a page that reports no further
//! pages, and yields at most one error before ending. Repository and commit
//! listings also end on a page with zero items. Starting a new stream from a
//! saved cursor resumes the listing.

use super::types::{Affiliation, CommitPage, Page, RepositoryEdge};
use super::GithubApi;
use crate::error::{StatcardError, StatcardResult};
use futures_util::stream::{self, Stream, StreamExt};
use std::future::Future;
use tracing::{debug, warn};

/// When a page stream stops following cursors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEnd {
    /// After the last page or a page with zero items
    LastOrEmpty,
    /// Only after the last page
    Last,
}

/// Build a page stream from a single-page fetch function.
pub fn pages<'a, T, F, Fut>(
    start: Option<String>,
    end: PageEnd,
    fetch: F,
) -> impl Stream<Item = StatcardResult<Page<T>>> + 'a
where
    T: 'a,
    F: FnMut(Option<String>) -> Fut + 'a,
    Fut: Future<Output = StatcardResult<Page<T>>> + 'a,
{
    // `None` state means the listing is exhausted
    stream::try_unfold((Some(start), fetch), move |(cursor, mut fetch)| async move {
        let Some(cursor) = cursor else {
            return Ok(None);
        };
        let page = fetch(cursor).await?;
        let next = if end == PageEnd::LastOrEmpty && page.items.is_empty() {
            None
        } else {
            page.next_cursor.clone().map(Some)
        };
        Ok::<_, StatcardError>(Some((page, (next, fetch))))
    })
}

/// Pages of repositories the user is affiliated with
pub fn repository_pages<'a>(
    api: &'a dyn GithubApi,
    login: &'a str,
    affiliations: &'a [Affiliation],
) -> impl Stream<Item = StatcardResult<Page<RepositoryEdge>>> + 'a {
    pages(None, PageEnd::LastOrEmpty, move |cursor: Option<String>| async move {
        api.repository_page(login, affiliations, cursor.as_deref())
            .await
    })
}

/// Pages of organization repositories, flattened per organization page.
///
/// A page of organizations that own no repositories flattens to zero items,
/// so only the cursor ends this listing.
pub fn organization_pages<'a>(
    api: &'a dyn GithubApi,
    login: &'a str,
) -> impl Stream<Item = StatcardResult<Page<RepositoryEdge>>> + 'a {
    pages(None, PageEnd::Last, move |cursor: Option<String>| async move {
        api.organization_page(login, cursor.as_deref()).await
    })
}

/// Pages of a repository's default-branch history.
///
/// Ends after a page without history (no default branch), a page with zero
/// commits, or the last page.
pub fn commit_pages<'a>(
    api: &'a dyn GithubApi,
    name: &'a str,
    owner: &'a str,
    start: Option<String>,
) -> impl Stream<Item = StatcardResult<CommitPage>> + 'a {
    stream::try_unfold(Some(start), move |cursor| async move {
        let Some(cursor) = cursor else {
            return Ok(None);
        };
        let page = api.commit_page(name, owner, cursor.as_deref()).await?;
        let next = page
            .history
            .as_ref()
            .filter(|h| !h.commits.items.is_empty())
            .and_then(|h| h.commits.next_cursor.clone())
            .map(Some);
        Ok::<_, StatcardError>(Some((page, next)))
    })
}

/// Drain a listing, keeping whatever was collected before a failure.
///
/// A failed page is logged and ends collection; it never propagates.
pub async fn collect_edges<S>(label: &str, pages: S) -> Vec<RepositoryEdge>
where
    S: Stream<Item = StatcardResult<Page<RepositoryEdge>>>,
{
    let mut pages = std::pin::pin!(pages);
    let mut edges = Vec::new();
    let mut count = 0usize;

    while let Some(result) = pages.next().await {
        match result {
            Ok(page) => {
                count += 1;
                edges.extend(page.items);
            }
            Err(e) => {
                warn!(
                    "Fetching {} failed after {} page(s): {}. Only already collected edges will be used",
                    label, count, e
                );
                break;
            }
        }
    }

    debug!("Collected {} {} edge(s) from {} page(s)", edges.len(), label, count);
    edges
}
