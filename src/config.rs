use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::errors::{AppError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://saavnify.qzz.io/api/search/songs";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdapterConfig {
    pub api_base_url: String,
    pub download_dir: PathBuf,
    pub preferred_quality: AudioQuality,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub proxy: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum AudioQuality {
    Low,    // 48 kbps
    Medium, // 96 kbps
    High,   // 160 kbps
    Best,   // 320 kbps
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            download_dir: PathBuf::from("downloads"),
            preferred_quality: AudioQuality::Best,
            request_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
        }
    }
}

impl AdapterConfig {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: AdapterConfig = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = AdapterConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| AppError::Config(config::ConfigError::Message(
                "Config path has no parent directory".to_string(),
            )))?;

        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config(config::ConfigError::Message(
                "Could not find config directory".to_string(),
            )))?;

        Ok(config_dir.join("saavn-adapter").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base_url).map_err(|e| {
            AppError::InvalidInput(format!("Invalid API base URL: {}", e))
        })?;
        Ok(())
    }

    pub fn quality_label(&self) -> &'static str {
        self.preferred_quality.label()
    }
}

impl AudioQuality {
    /// Quality label as the search service spells it in `downloadUrl` entries.
    pub fn label(&self) -> &'static str {
        match self {
            AudioQuality::Low => "48kbps",
            AudioQuality::Medium => "96kbps",
            AudioQuality::High => "160kbps",
            AudioQuality::Best => "320kbps",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AdapterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quality_label(), "320kbps");
        assert_eq!(config.download_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn quality_labels_match_service_spelling() {
        assert_eq!(AudioQuality::Low.label(), "48kbps");
        assert_eq!(AudioQuality::Medium.label(), "96kbps");
        assert_eq!(AudioQuality::High.label(), "160kbps");
        assert_eq!(AudioQuality::Best.label(), "320kbps");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let config = AdapterConfig {
            api_base_url: "not a url".to_string(),
            ..AdapterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AdapterConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AdapterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api_base_url, config.api_base_url);
        assert_eq!(parsed.preferred_quality, AudioQuality::Best);
    }
}
