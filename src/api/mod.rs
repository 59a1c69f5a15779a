use serde::{Deserialize, Serialize};

use crate::utils::seconds_to_time;

/// Envelope returned by the song-search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<SearchResults>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SongRecord>,
}

/// One song entry within a search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(rename = "downloadUrl", default)]
    pub download_url: Vec<DownloadLink>,
    #[serde(default)]
    pub image: Vec<ArtworkLink>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLink {
    pub quality: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkLink {
    pub url: String,
}

impl SongRecord {
    pub fn duration_text(&self) -> String {
        seconds_to_time(self.duration)
    }

    /// The service orders `image` ascending by resolution; the last entry is
    /// taken as the best available. Empty string when no artwork came back.
    pub fn best_artwork(&self) -> String {
        self.image.last().map(|a| a.url.clone()).unwrap_or_default()
    }
}

/// Projection returned by `details`: the fields a bot shows before playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    pub title: String,
    pub duration_text: String,
    pub duration_secs: u64,
    pub thumbnail: String,
    pub id: String,
}

impl TrackSummary {
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            title: record.name.clone(),
            duration_text: record.duration_text(),
            duration_secs: record.duration,
            thumbnail: record.best_artwork(),
            id: record.id.clone(),
        }
    }
}

/// Projection returned by `track`. Field names match what the host bot
/// destructures from the platform layer, so they stay as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDetails {
    pub title: String,
    pub link: String,
    pub vidid: String,
    pub duration_min: String,
    pub thumb: String,
}

impl TrackDetails {
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            title: record.name.clone(),
            link: record.url.clone(),
            vidid: record.id.clone(),
            duration_min: record.duration_text(),
            thumb: record.best_artwork(),
        }
    }
}

/// Projection returned by `slider`: one carousel entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderEntry {
    pub name: String,
    pub duration_text: String,
    pub thumbnail: String,
    pub id: String,
}

impl SliderEntry {
    pub fn from_record(record: &SongRecord) -> Self {
        Self {
            name: record.name.clone(),
            duration_text: record.duration_text(),
            thumbnail: record.best_artwork(),
            id: record.id.clone(),
        }
    }
}

/// A nominal format entry, as reported by `formats`. The backing service
/// exposes no real format negotiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongFormat {
    pub format: String,
    pub filesize: u64,
    pub ext: String,
}
