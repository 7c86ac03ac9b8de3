use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::{response, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    YouTube,
    TikTok,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Direction of a count between two consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "direction", content = "delta", rename_all = "snake_case")]
pub enum Trend {
    Up(u64),
    Down(u64),
    #[default]
    Unchanged,
}

impl Trend {
    pub fn between(previous: Option<u64>, current: u64) -> Self {
        match previous {
            Some(prev) if current > prev => Trend::Up(current - prev),
            Some(prev) if current < prev => Trend::Down(prev - current),
            _ => Trend::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub id: u64,
    pub url: String,
    pub platform: Platform,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub previous_views: Option<u64>,
    pub previous_likes: Option<u64>,
    pub views_trend: Trend,
    pub likes_trend: Trend,
    pub stale: bool,
    pub added_at: String,
    pub updated_at: Option<String>,
}

impl VideoEntry {
    pub fn new(id: u64, url: String, platform: Platform) -> Self {
        VideoEntry {
            id,
            url,
            platform,
            title: platform.display_name().to_string(),
            views: 0,
            likes: 0,
            previous_views: None,
            previous_likes: None,
            views_trend: Trend::Unchanged,
            likes_trend: Trend::Unchanged,
            stale: false,
            added_at: chrono::Utc::now().to_rfc3339(),
            updated_at: None,
        }
    }

    /// Whether a successful reading has ever been applied.
    pub fn has_observation(&self) -> bool {
        self.previous_views.is_some()
    }
}

/// Result of one stats lookup. `failed` marks the error sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedStats {
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub failed: bool,
}

impl FetchedStats {
    pub const ERROR_TITLE: &'static str = "Error";
    pub const UNKNOWN_TITLE: &'static str = "Unknown Title";

    pub fn sentinel() -> Self {
        FetchedStats {
            title: Self::ERROR_TITLE.to_string(),
            views: 0,
            likes: 0,
            failed: true,
        }
    }

    #[cfg(test)]
    pub fn as_triple(&self) -> (&str, u64, u64) {
        (&self.title, self.views, self.likes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPhase {
    Idle,
    Fetching,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshStatus {
    pub ticks: u32,
    pub max_ticks: u32,
    pub progress: f64,
    pub phase: RefreshPhase,
    pub in_flight: usize,
    pub interval_secs: u64,
    pub color: [u8; 3],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddLinksRequest {
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddLinksResponse {
    pub added: Vec<VideoEntry>,
    pub ignored: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub submitted: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip)]
    pub status: Status,
}

impl ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: "not_found".to_string(),
            message: message.into(),
            status: Status::NotFound,
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
