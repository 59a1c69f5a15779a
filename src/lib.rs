//! Saavn-backed media platform adapter for Telegram music bots.
//!
//! Exposes the fixed method surface a host bot expects from a platform
//! backend (`exists`, `url`, `details`, `title`, `duration`, `thumbnail`,
//! `video`, `track`, `formats`, `slider`, `download`) and delegates the
//! actual work to a remote song-search endpoint: one search round trip per
//! call, plus an optional streamed download to `downloads/<id>.m4a`.

pub mod api;
pub mod config;
pub mod downloader;
pub mod errors;
pub mod platform;
pub mod search;
pub mod telegram;
pub mod utils;

pub use api::{SliderEntry, SongFormat, SongRecord, TrackDetails, TrackSummary};
pub use config::{AdapterConfig, AudioQuality};
pub use downloader::AudioDownloader;
pub use errors::{AppError, Result};
pub use platform::{download_song, download_video, MediaPlatform, SaavnApi};
pub use search::SearchClient;
pub use telegram::Message;

/// Initializes the logger for host processes that don't bring their own.
/// Respects `RUST_LOG`, defaulting to info.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .ok();
}
