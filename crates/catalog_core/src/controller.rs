use std::{panic::AssertUnwindSafe, sync::Arc};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use shared::{
    domain::{Artwork, Page},
    error::FetchError,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{fetcher::PageFetcher, selection::SelectionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Loaded { page_index: u32 },
    Failed { page_index: u32 },
    /// A later navigation superseded this request.
    Stale { page_index: u32 },
    /// The source now reports fewer pages than requested; the last page was
    /// requested instead.
    Reclamped { requested: u32, target: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub records: &'a [Artwork],
    pub current_page: u32,
    pub total_pages: u32,
    pub state: LoadState,
    pub error: Option<&'a FetchError>,
    pub pending_page: Option<u32>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct PageResponse {
    seq: u64,
    page_index: u32,
    result: Result<Page, FetchError>,
}

/// Clamps a requested page into `[1, total_pages]`. With no known page count
/// every index from 1 up is accepted.
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    let requested = requested.max(1);
    if total_pages == 0 {
        requested
    } else {
        requested.min(total_pages)
    }
}

pub struct PageSelectionController {
    fetcher: Arc<dyn PageFetcher>,
    selection: SelectionSet,
    state: LoadState,
    records: Vec<Artwork>,
    current_page: u32,
    total_pages: u32,
    fetched_at: Option<DateTime<Utc>>,
    last_error: Option<FetchError>,
    pending_page: Option<u32>,
    latest_seq: u64,
    inflight: Option<JoinHandle<()>>,
    responses_tx: mpsc::UnboundedSender<PageResponse>,
    responses_rx: mpsc::UnboundedReceiver<PageResponse>,
}

impl PageSelectionController {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            selection: SelectionSet::new(),
            state: LoadState::Idle,
            records: Vec::new(),
            current_page: 0,
            total_pages: 0,
            fetched_at: None,
            last_error: None,
            pending_page: None,
            latest_seq: 0,
            inflight: None,
            responses_tx,
            responses_rx,
        }
    }

    /// Requests page `n` after clamping it against the latest known page
    /// count. Returns the page index actually requested.
    ///
    /// Must be called from within a tokio runtime.
    pub fn go_to_page(&mut self, n: u32) -> u32 {
        let page_index = clamp_page(n, self.total_pages);
        if page_index != n {
            debug!(
                requested = n,
                page = page_index,
                total_pages = self.total_pages,
                "catalog: clamped page request"
            );
        }
        self.issue(page_index);
        page_index
    }

    pub fn next_page(&mut self) -> Option<u32> {
        if self.current_page == 0 {
            return Some(self.go_to_page(1));
        }
        if self.total_pages > 0 && self.current_page >= self.total_pages {
            return None;
        }
        let next = self.current_page.checked_add(1)?;
        Some(self.go_to_page(next))
    }

    pub fn previous_page(&mut self) -> Option<u32> {
        if self.current_page <= 1 {
            return None;
        }
        Some(self.go_to_page(self.current_page - 1))
    }

    /// Requests the current page again, or page 1 when nothing has loaded.
    pub fn reload(&mut self) -> u32 {
        self.go_to_page(self.current_page.max(1))
    }

    pub fn is_row_selected(&self, record: &Artwork) -> bool {
        self.selection.is_selected(record.id)
    }

    pub fn toggle_row(&mut self, record: &Artwork, checked: bool) {
        if checked {
            self.selection.select(record.clone());
        } else {
            self.selection.unselect(record.id);
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn view(&self) -> PageView<'_> {
        PageView {
            records: &self.records,
            current_page: self.current_page,
            total_pages: self.total_pages,
            state: self.state,
            error: self.last_error.as_ref(),
            pending_page: self.pending_page,
            fetched_at: self.fetched_at,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Waits for the next fetch result and applies it. Returns `None` when no
    /// request is outstanding.
    pub async fn next_response(&mut self) -> Option<ResponseOutcome> {
        if !self.is_loading() {
            return None;
        }
        let response = self.responses_rx.recv().await?;
        Some(self.apply_response(response))
    }

    /// Applies results until the latest request has resolved.
    pub async fn settle(&mut self) -> LoadState {
        while self.is_loading() {
            if self.next_response().await.is_none() {
                break;
            }
        }
        self.state
    }

    pub fn poll_responses(&mut self) -> Vec<ResponseOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(response) = self.responses_rx.try_recv() {
            outcomes.push(self.apply_response(response));
        }
        outcomes
    }

    fn issue(&mut self, page_index: u32) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.state = LoadState::Loading;
        self.pending_page = Some(page_index);

        let fetcher = Arc::clone(&self.fetcher);
        let responses = self.responses_tx.clone();
        let task = tokio::spawn(async move {
            let result = AssertUnwindSafe(fetcher.fetch_page(page_index))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    error!(page = page_index, "catalog: page fetcher panicked");
                    Err(FetchError::transport("page fetcher panicked"))
                });
            let _ = responses.send(PageResponse {
                seq,
                page_index,
                result,
            });
        });
        // A superseded task keeps running; its result is dropped on arrival.
        self.inflight = Some(task);
        debug!(seq, page = page_index, "catalog: page requested");
    }

    fn apply_response(&mut self, response: PageResponse) -> ResponseOutcome {
        let PageResponse {
            seq,
            page_index,
            result,
        } = response;

        if seq != self.latest_seq {
            debug!(
                seq,
                latest = self.latest_seq,
                page = page_index,
                "catalog: discarding stale page response"
            );
            return ResponseOutcome::Stale { page_index };
        }

        self.inflight = None;
        self.pending_page = None;

        match result {
            Ok(page) => {
                self.total_pages = page.total_pages;
                if page.total_pages > 0 && page.index > page.total_pages {
                    let target = page.total_pages;
                    warn!(
                        requested = page.index,
                        total_pages = page.total_pages,
                        "catalog: page count shrank below requested page; requesting last page"
                    );
                    self.issue(target);
                    return ResponseOutcome::Reclamped {
                        requested: page.index,
                        target,
                    };
                }

                info!(
                    page = page.index,
                    total_pages = page.total_pages,
                    records = page.records.len(),
                    "catalog: page loaded"
                );
                self.current_page = page.index;
                self.records = page.records;
                self.fetched_at = Some(page.fetched_at);
                self.last_error = None;
                self.state = LoadState::Loaded;
                ResponseOutcome::Loaded { page_index }
            }
            Err(error) => {
                warn!(
                    page = page_index,
                    %error,
                    "catalog: page fetch failed; keeping previous page"
                );
                self.last_error = Some(error);
                self.state = LoadState::Error;
                ResponseOutcome::Failed { page_index }
            }
        }
    }
}

impl Drop for PageSelectionController {
    fn drop(&mut self) {
        if let Some(task) = self.inflight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
