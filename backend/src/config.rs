use crate::services::controller::TrackerController;
use crate::services::platform::PlatformRegistry;
use crate::services::stats_fetcher::YtDlpExtractor;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

lazy_static! {
    pub static ref REFRESH_INTERVAL_SECS: u64 = env_or("REFRESH_INTERVAL_SECS", 60);
    pub static ref TICK_MILLIS: u64 = env_or("TICK_MILLIS", 100);
    pub static ref FETCH_TIMEOUT_SECS: u64 = env_or("FETCH_TIMEOUT_SECS", 30);
    pub static ref FETCH_WORKERS: usize = env_or("FETCH_WORKERS", 4);
    pub static ref YTDLP_PATH: String =
        env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string());
    pub static ref FRONTEND_ORIGIN: String =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub refresh_interval_secs: u64,
    pub tick_millis: u64,
    pub fetch_timeout: Duration,
    pub fetch_workers: usize,
    pub ytdlp_path: String,
    pub frontend_origin: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            refresh_interval_secs: *REFRESH_INTERVAL_SECS,
            tick_millis: (*TICK_MILLIS).max(1),
            fetch_timeout: Duration::from_secs(*FETCH_TIMEOUT_SECS),
            fetch_workers: (*FETCH_WORKERS).max(1),
            ytdlp_path: YTDLP_PATH.clone(),
            frontend_origin: FRONTEND_ORIGIN.clone(),
        }
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting stats tracker backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

/// Drives the refresh counter on a fixed tick for the lifetime of the process.
pub fn spawn_refresh_loop(controller: Arc<TrackerController>, tick: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            controller.tick().await;
        }
    });
    info!("Refresh loop started ({tick:?} per tick).");
}

pub fn create_app_state(settings: &Settings) -> AppState {
    let controller = Arc::new(TrackerController::new(
        settings,
        Arc::new(PlatformRegistry::default()),
        Arc::new(YtDlpExtractor::new(settings.ytdlp_path.clone())),
    ));

    spawn_refresh_loop(
        controller.clone(),
        Duration::from_millis(settings.tick_millis),
    );
    info!(
        "Refreshing every {}s with {} worker(s), extractor: {}",
        settings.refresh_interval_secs, settings.fetch_workers, settings.ytdlp_path
    );

    AppState { controller }
}

pub fn create_cors(settings: &Settings) -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[settings.frontend_origin.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Delete, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_uses_default_when_unset() {
        assert_eq!(env_or("STATS_TRACKER_UNSET_FOR_TEST", 7u64), 7);
    }

    #[test]
    fn cors_accepts_configured_origin() {
        let mut settings = Settings::from_env();
        settings.frontend_origin = "http://localhost:9000".to_string();
        assert!(create_cors(&settings).is_ok());
    }

    #[test]
    fn cors_reports_malformed_origin() {
        let mut settings = Settings::from_env();
        settings.frontend_origin = "not an origin".to_string();

        let err = create_cors(&settings).unwrap_err();
        assert!(err.to_string().contains("Failed to create CORS options"));
    }
}
