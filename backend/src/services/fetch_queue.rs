use crate::models::{FetchedStats, Platform};
use crate::services::platform::PlatformRegistry;
use crate::services::stats_fetcher::{fetch_stats, StatsExtractor};
use crate::services::tracker::Tracker;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, RwLock, Semaphore};
use tokio::task::AbortHandle;

#[derive(Debug, Clone)]
pub struct FetchTask {
    pub entry_id: u64,
    pub url: String,
    pub platform: Platform,
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub entry_id: u64,
    pub stats: FetchedStats,
    pub finished_at: String,
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub workers: usize,
    pub timeout: Duration,
}

/// Runs stats lookups off the tick path.
///
/// Each submitted task waits for one of `workers` permits, then fetches. Results
/// go over a channel to a single applier task, which is the only writer of
/// fetch results into the [`Tracker`]. At most one task per entry is in flight.
pub struct FetchDispatcher {
    extractor: Arc<dyn StatsExtractor>,
    registry: Arc<PlatformRegistry>,
    permits: Arc<Semaphore>,
    timeout: Duration,
    results: mpsc::UnboundedSender<FetchResult>,
    in_flight: Arc<Mutex<HashMap<u64, AbortHandle>>>,
}

impl FetchDispatcher {
    /// Spawns the applier; must be called inside a tokio runtime.
    pub fn start(
        extractor: Arc<dyn StatsExtractor>,
        registry: Arc<PlatformRegistry>,
        tracker: Arc<RwLock<Tracker>>,
        settings: FetchSettings,
    ) -> Self {
        let (results, results_rx) = mpsc::unbounded_channel();
        let in_flight = Arc::new(Mutex::new(HashMap::new()));

        tokio::spawn(apply_results(results_rx, tracker, in_flight.clone()));

        FetchDispatcher {
            extractor,
            registry,
            permits: Arc::new(Semaphore::new(settings.workers.max(1))),
            timeout: settings.timeout,
            results,
            in_flight,
        }
    }

    /// Returns false when the entry already has a fetch in flight.
    pub fn submit(&self, task: FetchTask) -> bool {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if in_flight.contains_key(&task.entry_id) {
                return false;
            }
            let entry_id = task.entry_id;
            let handle = tokio::spawn(run_fetch(
                task,
                self.extractor.clone(),
                self.registry.clone(),
                self.permits.clone(),
                self.timeout,
                self.results.clone(),
            ));
            in_flight.insert(entry_id, handle.abort_handle());
            true
        } else {
            false
        }
    }

    pub fn submit_all(&self, tasks: impl IntoIterator<Item = FetchTask>) -> usize {
        tasks.into_iter().filter(|task| self.submit(task.clone())).count()
    }

    /// Aborts the entry's in-flight fetch, if any.
    pub fn cancel(&self, entry_id: u64) -> bool {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if let Some(handle) = in_flight.remove(&entry_id) {
                handle.abort();
                return true;
            }
        }
        false
    }

    pub fn in_flight(&self) -> usize {
        if let Ok(in_flight) = self.in_flight.lock() {
            in_flight.len()
        } else {
            0
        }
    }
}

async fn run_fetch(
    task: FetchTask,
    extractor: Arc<dyn StatsExtractor>,
    registry: Arc<PlatformRegistry>,
    permits: Arc<Semaphore>,
    timeout: Duration,
    results: mpsc::UnboundedSender<FetchResult>,
) {
    let Ok(_permit) = permits.acquire_owned().await else {
        return;
    };

    let stats = fetch_stats(
        extractor.as_ref(),
        &registry,
        &task.url,
        task.platform,
        timeout,
    )
    .await;

    let _ = results.send(FetchResult {
        entry_id: task.entry_id,
        stats,
        finished_at: chrono::Utc::now().to_rfc3339(),
    });
}

async fn apply_results(
    mut results: mpsc::UnboundedReceiver<FetchResult>,
    tracker: Arc<RwLock<Tracker>>,
    in_flight: Arc<Mutex<HashMap<u64, AbortHandle>>>,
) {
    while let Some(result) = results.recv().await {
        let entry_id = result.entry_id;
        let applied = tracker
            .write()
            .await
            .apply(entry_id, result.stats, result.finished_at);
        if !applied {
            debug!("Discarding stats for removed entry {entry_id}");
        }
        if let Ok(mut in_flight) = in_flight.lock() {
            in_flight.remove(&entry_id);
        }
    }
}
