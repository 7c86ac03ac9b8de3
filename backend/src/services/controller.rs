use crate::config::Settings;
use crate::models::{RefreshPhase, RefreshStatus, VideoEntry};
use crate::services::fetch_queue::{FetchDispatcher, FetchSettings, FetchTask};
use crate::services::link_collector::collect_links;
use crate::services::platform::PlatformRegistry;
use crate::services::refresh::{RefreshCounter, Tick};
use crate::services::stats_fetcher::StatsExtractor;
use crate::services::tracker::Tracker;
use log::info;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Owns the tracked entries and the refresh cycle; the HTTP layer only reads
/// snapshots and forwards user actions here.
pub struct TrackerController {
    tracker: Arc<RwLock<Tracker>>,
    counter: Mutex<RefreshCounter>,
    registry: Arc<PlatformRegistry>,
    dispatcher: FetchDispatcher,
}

impl TrackerController {
    pub fn new(
        settings: &Settings,
        registry: Arc<PlatformRegistry>,
        extractor: Arc<dyn StatsExtractor>,
    ) -> Self {
        let tracker = Arc::new(RwLock::new(Tracker::new()));
        let dispatcher = FetchDispatcher::start(
            extractor,
            registry.clone(),
            tracker.clone(),
            FetchSettings {
                workers: settings.fetch_workers,
                timeout: settings.fetch_timeout,
            },
        );

        TrackerController {
            tracker,
            counter: Mutex::new(RefreshCounter::new(
                settings.refresh_interval_secs,
                settings.tick_millis,
            )),
            registry,
            dispatcher,
        }
    }

    /// Adds every recognised link from comma-separated input, then refreshes all entries.
    pub async fn add_links(&self, input: &str) -> (Vec<VideoEntry>, usize) {
        let collected = collect_links(input, &self.registry);
        let added = self.tracker.write().await.add(collected.links);

        if !added.is_empty() {
            info!(
                "Added {} video(s), ignored {} token(s)",
                added.len(),
                collected.ignored
            );
        }
        self.refresh_all().await;

        (added, collected.ignored)
    }

    pub async fn remove(&self, id: u64) -> bool {
        let removed = self.tracker.write().await.remove(id);
        match removed {
            Some(entry) => {
                self.dispatcher.cancel(id);
                info!("Removed {} video: {}", entry.platform, entry.url);
                true
            }
            None => false,
        }
    }

    /// Queues one fetch per entry and returns how many were submitted.
    pub async fn refresh_all(&self) -> usize {
        let tasks: Vec<FetchTask> = self
            .tracker
            .read()
            .await
            .entries()
            .iter()
            .map(|entry| FetchTask {
                entry_id: entry.id,
                url: entry.url.clone(),
                platform: entry.platform,
            })
            .collect();

        let total = tasks.len();
        let submitted = self.dispatcher.submit_all(tasks);
        if total > 0 {
            info!("Refresh pass: submitted {submitted} of {total} fetch(es)");
        }
        submitted
    }

    pub async fn tick(&self) -> Tick {
        let tick = self.counter.lock().await.tick();
        if tick == Tick::Elapsed {
            self.refresh_all().await;
        }
        tick
    }

    pub async fn entries(&self) -> Vec<VideoEntry> {
        self.tracker.read().await.entries().to_vec()
    }

    pub async fn get(&self, id: u64) -> Option<VideoEntry> {
        self.tracker.read().await.get(id).cloned()
    }

    pub async fn refresh_status(&self) -> RefreshStatus {
        let counter = self.counter.lock().await;
        let in_flight = self.dispatcher.in_flight();

        RefreshStatus {
            ticks: counter.ticks(),
            max_ticks: counter.max_ticks(),
            progress: counter.progress(),
            phase: if in_flight > 0 {
                RefreshPhase::Fetching
            } else {
                RefreshPhase::Idle
            },
            in_flight,
            interval_secs: counter.interval_secs(),
            color: counter.color(),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::services::stats_fetcher::testing::FakeExtractor;
    use std::time::Duration;

    pub fn test_settings() -> Settings {
        Settings {
            refresh_interval_secs: 1,
            tick_millis: 250,
            fetch_timeout: Duration::from_secs(5),
            fetch_workers: 2,
            ytdlp_path: "yt-dlp".to_string(),
            frontend_origin: "http://localhost:8080".to_string(),
        }
    }

    pub fn controller_with(extractor: Arc<FakeExtractor>) -> TrackerController {
        TrackerController::new(
            &test_settings(),
            Arc::new(PlatformRegistry::default()),
            extractor,
        )
    }

    pub async fn wait_idle(controller: &TrackerController) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while controller.refresh_status().await.in_flight > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("fetches did not finish");
    }
}
