pub mod controller;
pub mod fetch_queue;
pub mod link_collector;
pub mod platform;
pub mod refresh;
pub mod stats_fetcher;
pub mod tracker;
