use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::auth::Token;
use crate::error::Result;
use crate::output::{state_colored_title, PhaseProgress};

use super::approval::approval_from_notes;
use super::client::GitLabClient;
use super::types::MergeRequest;

/// How the per-item enrichment should behave.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions {
    /// Include merged and closed merge requests, with state-colored titles
    pub all_states: bool,
    /// Upper bound on concurrent notes fetches; `None` spawns every task at once
    pub max_concurrency: Option<usize>,
}

/// Fetches the token owner's merge requests and annotates each with its
/// review status.
pub struct GitLabProvider {
    client: Arc<GitLabClient>,
}

impl GitLabProvider {
    /// # Errors
    ///
    /// Returns an error if the API base URL cannot be built from `base_url`.
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = GitLabClient::new(base_url, token)?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Lists merge requests, then enriches every one of them concurrently.
    ///
    /// The result has exactly the records returned by the list call, in no
    /// particular order.
    ///
    /// # Errors
    ///
    /// A failed list call is returned as-is. Failed notes fetches are only
    /// logged; the affected record keeps `approval == None`.
    pub async fn collect_merge_requests(&self, options: EnrichOptions) -> Result<Vec<MergeRequest>> {
        let progress = PhaseProgress::start_listing();

        let merge_requests = self.client.list_merge_requests(!options.all_states).await?;
        info!("Fetched {} merge requests", merge_requests.len());

        let progress = progress.finish_listing_start_notes(merge_requests.len());

        let enriched =
            enrich_merge_requests(Arc::clone(&self.client), merge_requests, options).await?;

        progress.finish_notes();

        Ok(enriched)
    }
}

/// Spawns one task per merge request and waits for all of them.
///
/// Each task takes ownership of its record, fills in `approval` (and the
/// title color in all-states mode) and hands the record back through the
/// join set, so no record is ever shared between tasks.
///
/// # Errors
///
/// Only a panicked task is an error, since its record cannot be recovered.
pub async fn enrich_merge_requests(
    client: Arc<GitLabClient>,
    merge_requests: Vec<MergeRequest>,
    options: EnrichOptions,
) -> Result<Vec<MergeRequest>> {
    let semaphore = options
        .max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

    let total = merge_requests.len();
    let mut tasks = JoinSet::new();

    for mr in merge_requests {
        let client = Arc::clone(&client);
        let semaphore = semaphore.clone();

        tasks.spawn(async move {
            // The semaphore is never closed, so acquiring cannot fail
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            enrich_one(&client, mr, options.all_states).await
        });
    }

    let mut enriched = Vec::with_capacity(total);
    while let Some(result) = tasks.join_next().await {
        enriched.push(result?);
    }

    Ok(enriched)
}

async fn enrich_one(client: &GitLabClient, mut mr: MergeRequest, all_states: bool) -> MergeRequest {
    match client.list_notes(mr.project_id, mr.iid).await {
        Ok(notes) => mr.approval = Some(approval_from_notes(&notes)),
        Err(e) => warn!(
            "Failed to get notes for merge request !{} (project {}): {e}",
            mr.iid, mr.project_id
        ),
    }

    if all_states {
        mr.title = state_colored_title(&mr.title, mr.state);
    }

    mr
}
