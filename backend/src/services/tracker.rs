use crate::models::{FetchedStats, Trend, VideoEntry};
use crate::services::link_collector::CollectedLink;

/// In-memory entry list, newest first.
#[derive(Debug, Default)]
pub struct Tracker {
    entries: Vec<VideoEntry>,
    next_id: u64,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts each link at the top in turn, so the last link ends up first.
    pub fn add(&mut self, links: Vec<CollectedLink>) -> Vec<VideoEntry> {
        let mut added = Vec::with_capacity(links.len());
        for link in links {
            self.next_id += 1;
            let entry = VideoEntry::new(self.next_id, link.url, link.platform);
            added.push(entry.clone());
            self.entries.insert(0, entry);
        }
        added
    }

    pub fn remove(&mut self, id: u64) -> Option<VideoEntry> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn get(&self, id: u64) -> Option<&VideoEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    /// Applies a fetch result. Returns false when the entry no longer exists.
    pub fn apply(&mut self, id: u64, stats: FetchedStats, observed_at: String) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                apply_stats(entry, stats, observed_at);
                true
            }
            None => false,
        }
    }
}

fn apply_stats(entry: &mut VideoEntry, stats: FetchedStats, observed_at: String) {
    entry.updated_at = Some(observed_at);

    if stats.failed {
        // Last good reading survives a failed fetch.
        if !entry.has_observation() {
            entry.title = stats.title;
            entry.views = stats.views;
            entry.likes = stats.likes;
        }
        entry.views_trend = Trend::Unchanged;
        entry.likes_trend = Trend::Unchanged;
        entry.stale = true;
        return;
    }

    entry.views_trend = Trend::between(entry.previous_views, stats.views);
    entry.likes_trend = Trend::between(entry.previous_likes, stats.likes);
    entry.previous_views = Some(stats.views);
    entry.previous_likes = Some(stats.likes);
    entry.title = stats.title;
    entry.views = stats.views;
    entry.likes = stats.likes;
    entry.stale = false;
}
