use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "direction", content = "delta", rename_all = "snake_case")]
pub enum Trend {
    Up(u64),
    Down(u64),
    #[default]
    Unchanged,
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

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLinksResponse {
    pub added: Vec<VideoEntry>,
    pub ignored: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub submitted: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
