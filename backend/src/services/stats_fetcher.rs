use crate::models::{FetchedStats, Platform};
use crate::services::platform::PlatformRegistry;
use anyhow::{Context, Result};
use log::error;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Subset of the extractor's info record that the tracker reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedInfo {
    pub title: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
}

#[rocket::async_trait]
pub trait StatsExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedInfo>;
}

pub struct YtDlpExtractor {
    binary: String,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<String>) -> Self {
        YtDlpExtractor {
            binary: binary.into(),
        }
    }
}

#[rocket::async_trait]
impl StatsExtractor for YtDlpExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedInfo> {
        let output = Command::new(&self.binary)
            .arg("--dump-single-json")
            .arg("--skip-download")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--quiet")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.binary))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            ));
        }

        serde_json::from_slice(&output.stdout).context("Failed to parse extractor JSON")
    }
}

/// Looks up title, views and likes for one video.
///
/// Never fails: any extractor error, including a timeout, is logged and
/// turned into [`FetchedStats::sentinel`].
pub async fn fetch_stats(
    extractor: &dyn StatsExtractor,
    registry: &PlatformRegistry,
    url: &str,
    platform: Platform,
    timeout: Duration,
) -> FetchedStats {
    let url = registry.normalize(platform, url);

    let result = match tokio::time::timeout(timeout, extractor.extract(&url)).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("timed out after {timeout:?}")),
    };

    match result {
        Ok(info) => FetchedStats {
            title: info
                .title
                .unwrap_or_else(|| FetchedStats::UNKNOWN_TITLE.to_string()),
            views: info.view_count.unwrap_or(0),
            likes: info.like_count.unwrap_or(0),
            failed: false,
        },
        Err(e) => {
            error!("Error fetching {url}: {e:#}");
            FetchedStats::sentinel()
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub enum Scripted {
        Info(ExtractedInfo),
        Fail(&'static str),
        Hang,
    }

    pub fn info(title: &str, views: u64, likes: u64) -> Scripted {
        Scripted::Info(ExtractedInfo {
            title: Some(title.to_string()),
            view_count: Some(views),
            like_count: Some(likes),
        })
    }

    /// Extractor answering from a script keyed by normalized URL.
    #[derive(Default)]
    pub struct FakeExtractor {
        script: Mutex<HashMap<String, Scripted>>,
        calls: Mutex<Vec<String>>,
        started: AtomicUsize,
    }

    impl FakeExtractor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, url: &str, response: Scripted) {
            self.script
                .lock()
                .unwrap()
                .insert(url.to_string(), response);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn started(&self) -> usize {
            self.started.load(Ordering::SeqCst)
        }
    }

    #[rocket::async_trait]
    impl StatsExtractor for FakeExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractedInfo> {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(url.to_string());
            let response = self.script.lock().unwrap().get(url).cloned();
            match response {
                Some(Scripted::Info(info)) => Ok(info),
                Some(Scripted::Fail(message)) => Err(anyhow::anyhow!(message)),
                Some(Scripted::Hang) => std::future::pending().await,
                None => Err(anyhow::anyhow!("Unsupported URL: {url}")),
            }
        }
    }
}
