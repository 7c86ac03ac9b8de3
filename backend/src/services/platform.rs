use crate::models::Platform;
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

pub trait PlatformHandler: Send + Sync {
    fn platform(&self) -> Platform;

    fn matches(&self, url: &str) -> bool;

    /// Rewrites a platform URL into the form handed to the extractor.
    fn normalize(&self, url: &str) -> String;
}

/// Ordered set of handlers; the first handler whose predicate matches wins.
pub struct PlatformRegistry {
    handlers: Vec<Box<dyn PlatformHandler>>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
            .with_handler(YouTubeHandler)
            .with_handler(TikTokHandler)
    }
}

impl PlatformRegistry {
    pub fn new() -> Self {
        PlatformRegistry {
            handlers: Vec::new(),
        }
    }

    pub fn with_handler(mut self, handler: impl PlatformHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn classify(&self, url: &str) -> Option<Platform> {
        self.handlers
            .iter()
            .find(|handler| handler.matches(url))
            .map(|handler| handler.platform())
    }

    pub fn normalize(&self, platform: Platform, url: &str) -> String {
        match self.handlers.iter().find(|h| h.platform() == platform) {
            Some(handler) => handler.normalize(url),
            None => url.to_string(),
        }
    }
}

pub struct YouTubeHandler;

impl PlatformHandler for YouTubeHandler {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("youtube") || url.contains("youtu.be")
    }

    fn normalize(&self, url: &str) -> String {
        match extract_youtube_video_id(url) {
            Some(id) => format!("{WATCH_URL}{id}"),
            None => url.to_string(),
        }
    }
}

pub struct TikTokHandler;

impl PlatformHandler for TikTokHandler {
    fn platform(&self) -> Platform {
        Platform::TikTok
    }

    fn matches(&self, url: &str) -> bool {
        url.contains("tiktok")
    }

    fn normalize(&self, url: &str) -> String {
        url.split('?').next().unwrap_or(url).to_string()
    }
}

fn extract_youtube_video_id(url: &str) -> Option<String> {
    let id = if url.contains("youtube.com/shorts/") || url.contains("youtu.be/") {
        url.rsplit('/').next()?.split('?').next()?
    } else if url.contains("watch?v=") {
        url.rsplit("watch?v=").next()?.split('&').next()?
    } else {
        return parse_youtube_video_id(url);
    };

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

// Forms the substring rules miss: `watch` with `v` not first, `/embed/<id>`, `/live/<id>`.
fn parse_youtube_video_id(url: &str) -> Option<String> {
    let parsed_url = Url::parse(url).ok()?;

    if parsed_url.path() == "/watch" {
        return parsed_url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.to_string())
            .filter(|id| !id.is_empty());
    }

    let mut segments = parsed_url.path_segments()?;
    match segments.next() {
        Some("embed") | Some("live") => segments
            .next()
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string()),
        _ => None,
    }
}
