use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info, warn};
use regex::Regex;

use crate::api::{SliderEntry, SongFormat, TrackDetails, TrackSummary};
use crate::config::AdapterConfig;
use crate::downloader::{AudioDownloader, AUDIO_EXTENSION};
use crate::errors::{AppError, Result};
use crate::search::SearchClient;
use crate::telegram::Message;

const SONG_BASE_URL: &str = "https://www.jiosaavn.com/song/";
const LINK_PATTERN: &str = r"(?:jiosaavn\.com|saavn\.com)";

/// The method surface a host bot calls on a media platform backend.
///
/// Method names and shapes are fixed; the bot destructures them by name.
#[async_trait]
pub trait MediaPlatform: Send + Sync {
    async fn exists(&self, link: &str) -> bool;
    async fn url(&self, message: &Message) -> Option<String>;
    async fn details(&self, link: &str) -> Result<TrackSummary>;
    async fn title(&self, link: &str) -> Result<String>;
    async fn duration(&self, link: &str) -> Result<String>;
    async fn thumbnail(&self, link: &str) -> Result<String>;
    async fn video(&self, link: &str) -> Result<PathBuf>;
    async fn track(&self, link: &str) -> Result<(TrackDetails, String)>;
    async fn formats(&self, link: &str) -> (Vec<SongFormat>, String);
    async fn slider(&self, link: &str, index: usize) -> Result<SliderEntry>;
    async fn download(&self, link: &str, video: bool) -> Result<PathBuf>;
}

/// Saavn-backed implementation of the platform surface.
///
/// Stateless across calls: every method runs its own search round trip, and
/// only downloaded audio files outlive a call.
pub struct SaavnApi {
    search: SearchClient,
    downloader: AudioDownloader,
    base: String,
    link_pattern: Regex,
}

impl SaavnApi {
    pub fn new() -> Result<Self> {
        Self::with_config(AdapterConfig::default())
    }

    /// Builds the adapter from the saved configuration file, writing the
    /// defaults on first run.
    pub fn from_saved_config() -> Result<Self> {
        Self::with_config(AdapterConfig::load()?)
    }

    pub fn with_config(config: AdapterConfig) -> Result<Self> {
        config.validate()?;
        let link_pattern = Regex::new(LINK_PATTERN)
            .map_err(|e| AppError::InvalidInput(format!("Invalid link pattern: {}", e)))?;
        Ok(Self {
            search: SearchClient::new(&config)?,
            downloader: AudioDownloader::new(&config)?,
            base: SONG_BASE_URL.to_string(),
            link_pattern,
        })
    }

    /// Canonical song page URL for an id.
    pub fn song_url(&self, id: &str) -> String {
        format!("{}{}", self.base, id)
    }

    // Shared search-then-fetch path behind `video` and `download`.
    async fn download_audio(&self, link: &str) -> Result<PathBuf> {
        let record = self.search.first(link).await?;
        self.downloader.fetch(&record).await
    }
}

#[async_trait]
impl MediaPlatform for SaavnApi {
    /// Always answers true so the bot takes the search path; the service
    /// resolves free text and links alike.
    async fn exists(&self, link: &str) -> bool {
        if self.link_pattern.is_match(link) {
            debug!("🔗 [PLATFORM] Recognized Saavn link: {}", link);
        }
        true
    }

    /// URL-typed entity from the message, falling back to its reply target.
    async fn url(&self, message: &Message) -> Option<String> {
        if let Some(url) = message.url_entity_text() {
            return Some(url);
        }
        message
            .reply_to_message
            .as_deref()
            .and_then(|reply| reply.url_entity_text())
    }

    async fn details(&self, link: &str) -> Result<TrackSummary> {
        let record = self.search.first(link).await?;
        Ok(TrackSummary::from_record(&record))
    }

    async fn title(&self, link: &str) -> Result<String> {
        Ok(self.details(link).await?.title)
    }

    async fn duration(&self, link: &str) -> Result<String> {
        Ok(self.details(link).await?.duration_text)
    }

    async fn thumbnail(&self, link: &str) -> Result<String> {
        Ok(self.details(link).await?.thumbnail)
    }

    /// The service is audio-only; a video request is served the audio file.
    async fn video(&self, link: &str) -> Result<PathBuf> {
        warn!("🎬 [PLATFORM] Video requested, serving audio: {}", link);
        self.download_audio(link).await
    }

    async fn track(&self, link: &str) -> Result<(TrackDetails, String)> {
        let record = self.search.first(link).await?;
        let details = TrackDetails::from_record(&record);
        Ok((details, record.id))
    }

    /// Constant nominal format list; the service negotiates nothing.
    async fn formats(&self, link: &str) -> (Vec<SongFormat>, String) {
        let formats = vec![SongFormat {
            format: "320kbps".to_string(),
            filesize: 0,
            ext: AUDIO_EXTENSION.to_string(),
        }];
        (formats, link.to_string())
    }

    async fn slider(&self, link: &str, index: usize) -> Result<SliderEntry> {
        let record = self.search.at_index(link, index).await?;
        Ok(SliderEntry::from_record(&record))
    }

    /// Unified download entry point. The `video` flag is accepted for
    /// surface compatibility and ignored.
    async fn download(&self, link: &str, video: bool) -> Result<PathBuf> {
        if video {
            info!("🎬 [PLATFORM] Video flag ignored, downloading audio: {}", link);
        }
        self.download_audio(link).await
    }
}

/// Downloads the first match for a query as audio.
pub async fn download_song(link: &str) -> Result<PathBuf> {
    SaavnApi::new()?.download(link, false).await
}

/// Video counterpart kept for surface compatibility; serves audio.
pub async fn download_video(link: &str) -> Result<PathBuf> {
    SaavnApi::new()?.download(link, true).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::{MessageEntity, MessageEntityKind};

    fn api() -> SaavnApi {
        SaavnApi::new().unwrap()
    }

    fn url_message(text: &str, offset: usize, length: usize) -> Message {
        Message {
            text: Some(text.to_string()),
            entities: vec![MessageEntity {
                kind: MessageEntityKind::Url,
                offset,
                length,
            }],
            ..Message::default()
        }
    }

    #[tokio::test]
    async fn exists_always_answers_true() {
        let api = api();
        assert!(api.exists("https://www.jiosaavn.com/song/x").await);
        assert!(api.exists("some free text query").await);
        assert!(api.exists("").await);
    }

    #[tokio::test]
    async fn formats_is_constant_and_echoes_the_link() {
        let api = api();
        let (formats, link) = api.formats("anything at all").await;
        assert_eq!(link, "anything at all");
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].format, "320kbps");
        assert_eq!(formats[0].filesize, 0);
        assert_eq!(formats[0].ext, "m4a");

        let (again, _) = api.formats("something else").await;
        assert_eq!(again[0].format, "320kbps");
    }

    #[tokio::test]
    async fn url_prefers_the_primary_message() {
        let api = api();
        let mut message = url_message("https://a.example", 0, 17);
        message.reply_to_message =
            Some(Box::new(url_message("https://b.example", 0, 17)));

        assert_eq!(api.url(&message).await.as_deref(), Some("https://a.example"));
    }

    #[tokio::test]
    async fn url_falls_back_to_the_reply_target() {
        let api = api();
        let mut message = Message {
            text: Some("no links here".to_string()),
            ..Message::default()
        };
        message.reply_to_message =
            Some(Box::new(url_message("https://b.example", 0, 17)));

        assert_eq!(api.url(&message).await.as_deref(), Some("https://b.example"));
    }

    #[tokio::test]
    async fn url_is_none_without_any_url_entity() {
        let api = api();
        let message = Message {
            text: Some("just words".to_string()),
            ..Message::default()
        };
        assert!(api.url(&message).await.is_none());
    }

    #[test]
    fn song_url_joins_base_and_id() {
        let api = api();
        assert_eq!(
            api.song_url("abc123"),
            "https://www.jiosaavn.com/song/abc123"
        );
    }
}
