//! Overview controller: periodic occupancy stats and debounced barcode
//! search.
//!
//! [`OverviewHandle::start`] spawns two tasks scoped to the returned handle:
//!
//! * a stats poller that refreshes [`DashboardStats`] immediately and then
//!   on a fixed interval;
//! * a search debouncer that resolves the latest query once typing has been
//!   quiet for the debounce window, and only publishes the response of the
//!   most recently issued resolve.
//!
//! Both tasks stop when the handle is shut down or dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use stockmap_client::{InventoryApiError, InventorySource};
use stockmap_core::classifier::LocationClassifier;
use stockmap_core::search::{is_blank_query, select_bom_entry, SearchResult};
use stockmap_core::sequence::{SearchSequence, SearchTicket};
use stockmap_core::stats::{compute_stats, DashboardStats};

use crate::config::DashboardConfig;

/// Timer settings for the overview tasks.
#[derive(Debug, Clone, Copy)]
pub struct OverviewSettings {
    pub stats_interval: Duration,
    pub search_debounce: Duration,
}

impl Default for OverviewSettings {
    fn default() -> Self {
        Self {
            stats_interval: Duration::from_secs(5),
            search_debounce: Duration::from_millis(500),
        }
    }
}

impl From<&DashboardConfig> for OverviewSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            stats_interval: config.stats_interval,
            search_debounce: config.search_debounce,
        }
    }
}

// ---------------------------------------------------------------------------
// One-shot operations
// ---------------------------------------------------------------------------

/// Fetch the location list and compute overview stats.
pub async fn refresh_stats(
    source: &dyn InventorySource,
    classifier: &LocationClassifier,
) -> Result<DashboardStats, InventoryApiError> {
    let locations = source.locations().await?;
    Ok(compute_stats(&locations, classifier))
}

/// Resolve a barcode query, BOM first and single item second.
///
/// A BOM lookup that fails or returns nothing falls through to the
/// item-details lookup; a failed item lookup yields `None`. Neither
/// failure is surfaced beyond the log.
pub async fn resolve_barcode(source: &dyn InventorySource, query: &str) -> Option<SearchResult> {
    match source.bom(Some(query)).await {
        Ok(entries) => {
            if let Some(entry) = select_bom_entry(&entries, query) {
                return Some(SearchResult::from_bom(entry.clone()));
            }
        }
        Err(e) => {
            tracing::warn!(query, error = %e, "BOM search failed, falling back to item details");
        }
    }

    match source.item_details(query).await {
        Ok(details) => Some(SearchResult::from_item_details(details)),
        Err(e) => {
            tracing::debug!(query, error = %e, "No BOM or item matches query");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Running overview controller. Dropping the handle cancels its tasks.
pub struct OverviewHandle {
    stats_rx: watch::Receiver<DashboardStats>,
    search_rx: watch::Receiver<Option<SearchResult>>,
    query_tx: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl OverviewHandle {
    /// Spawn the stats poller and the search debouncer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        source: Arc<dyn InventorySource>,
        classifier: LocationClassifier,
        settings: OverviewSettings,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (stats_tx, stats_rx) = watch::channel(DashboardStats::default());
        let (search_tx, search_rx) = watch::channel(None);
        let (query_tx, query_rx) = mpsc::unbounded_channel();

        let poller = tokio::spawn(run_stats_poller(
            Arc::clone(&source),
            classifier,
            settings.stats_interval,
            stats_tx,
            cancel.child_token(),
        ));
        let searcher = tokio::spawn(run_search(
            source,
            settings.search_debounce,
            query_rx,
            search_tx,
            cancel.child_token(),
        ));

        tracing::info!(
            stats_interval_ms = settings.stats_interval.as_millis() as u64,
            search_debounce_ms = settings.search_debounce.as_millis() as u64,
            "Overview controller started",
        );

        Self {
            stats_rx,
            search_rx,
            query_tx,
            cancel,
            tasks: vec![poller, searcher],
        }
    }

    /// Feed a new query value (every keystroke or scan).
    pub fn set_query(&self, query: impl Into<String>) {
        if self.query_tx.send(query.into()).is_err() {
            tracing::debug!("Search task already stopped, query ignored");
        }
    }

    /// Latest computed stats.
    pub fn stats(&self) -> DashboardStats {
        *self.stats_rx.borrow()
    }

    pub fn subscribe_stats(&self) -> watch::Receiver<DashboardStats> {
        self.stats_rx.clone()
    }

    /// Latest published search result; `None` when no search is active.
    pub fn search_result(&self) -> Option<SearchResult> {
        self.search_rx.borrow().clone()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<Option<SearchResult>> {
        self.search_rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Cancel both tasks and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Overview task ended abnormally");
            }
        }
        tracing::info!("Overview controller stopped");
    }
}

impl Drop for OverviewHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

async fn run_stats_poller(
    source: Arc<dyn InventorySource>,
    classifier: LocationClassifier,
    interval: Duration,
    stats_tx: watch::Sender<DashboardStats>,
    cancel: CancellationToken,
) {
    // The first tick completes immediately.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            result = refresh_stats(source.as_ref(), &classifier) => match result {
                Ok(stats) => {
                    tracing::debug!(
                        total_stock = stats.total_stock,
                        occupied = stats.occupied_cells,
                        empty = stats.empty_cells,
                        "Stats refreshed",
                    );
                    stats_tx.send_replace(stats);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Stats refresh failed");
                }
            }
        }
    }
}

async fn run_search(
    source: Arc<dyn InventorySource>,
    debounce: Duration,
    mut query_rx: mpsc::UnboundedReceiver<String>,
    search_tx: watch::Sender<Option<SearchResult>>,
    cancel: CancellationToken,
) {
    let mut sequence = SearchSequence::new();
    let mut in_flight: JoinSet<(SearchTicket, Option<SearchResult>)> = JoinSet::new();
    let mut pending: Option<String> = None;

    let timer = tokio::time::sleep(debounce);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            query = query_rx.recv() => {
                let Some(query) = query else { break };
                if is_blank_query(&query) {
                    pending = None;
                    // Supersede anything still in flight.
                    sequence.issue();
                    search_tx.send_replace(None);
                } else {
                    pending = Some(query);
                    timer.as_mut().reset(Instant::now() + debounce);
                }
            }

            _ = &mut timer, if pending.is_some() => {
                let Some(query) = pending.take() else { continue };
                let ticket = sequence.issue();
                tracing::debug!(query = %query, ticket = ticket.get(), "Resolving barcode");

                let source = Arc::clone(&source);
                in_flight.spawn(async move {
                    let result = resolve_barcode(source.as_ref(), &query).await;
                    (ticket, result)
                });
            }

            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok((ticket, result)) if sequence.is_current(ticket) => {
                        search_tx.send_replace(result);
                    }
                    Ok((ticket, _)) => {
                        tracing::debug!(ticket = ticket.get(), "Discarding stale search response");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Search task failed");
                    }
                }
            }
        }
    }

    in_flight.abort_all();
}
