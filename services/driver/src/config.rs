use nao_core::download::Voice;
use reqwest::Url;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub robot_ip: String,
    pub sound_location: PathBuf,
    pub speech_url: Url,
    pub speech_voice: Voice,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let robot_ip = std::env::var("ROBOT_IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        if robot_ip.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "ROBOT_IP".to_string(),
                "address must not be empty".to_string(),
            ));
        }

        let sound_location = std::env::var("SOUND_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/home/nao/fun/sound"));

        let speech_url_str = std::env::var("SPEECH_URL")
            .map_err(|_| ConfigError::MissingVar("SPEECH_URL".to_string()))?;
        let speech_url = Url::parse(&speech_url_str)
            .map_err(|e| ConfigError::InvalidValue("SPEECH_URL".to_string(), e.to_string()))?;

        let speech_voice = match std::env::var("SPEECH_VOICE") {
            Ok(voice) => voice
                .parse::<Voice>()
                .map_err(|e| ConfigError::InvalidValue("SPEECH_VOICE".to_string(), e))?,
            Err(_) => Voice::default(),
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            robot_ip,
            sound_location,
            speech_url,
            speech_voice,
            log_level,
        })
    }
}
