//! File and Speech Downloads
//!
//! Sound files played by the robot are fetched over HTTP and written under a base
//! directory. Speech is synthesised by a remote service and cached on disk: a phrase is
//! only requested when its `<stem>.wav` file does not exist yet.

use crate::error::DownloadError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::info;

/// Writes the body of a successful response to `path`, chunk by chunk.
///
/// The status is checked before the file is created, so a failed request leaves
/// nothing behind.
async fn save_response(response: Response, path: &Path) -> Result<(), DownloadError> {
    let mut response = response.error_for_status()?;
    let io_err = |source| DownloadError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut file = File::create(path).await.map_err(io_err)?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await.map_err(io_err)?;
    }
    file.flush().await.map_err(io_err)?;
    Ok(())
}

/// Downloads arbitrary files into a base directory.
#[derive(Debug, Clone)]
pub struct FileDownloader {
    client: Client,
    base_path: PathBuf,
}

impl FileDownloader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            base_path: base_path.into(),
        }
    }

    /// Fetches `url` into `<base_path>/<file>`, replacing any existing file.
    pub async fn download(&self, url: &str, file: &str) -> Result<PathBuf, DownloadError> {
        let full_path = self.base_path.join(file);
        info!(%url, path = %full_path.display(), "Downloading file");

        let response = self.client.get(url).send().await?;
        save_response(response, &full_path).await?;
        Ok(full_path)
    }
}

/// Voices the speech service can synthesise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Female,
    Male,
    Neutral,
}

impl std::str::FromStr for Voice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "female" => Ok(Voice::Female),
            "male" => Ok(Voice::Male),
            "neutral" => Ok(Voice::Neutral),
            other => Err(format!("'{}' is not a known voice", other)),
        }
    }
}

/// The request body accepted by the speech service.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest<'a> {
    pub format: &'a str,
    pub text: &'a str,
    pub voice: Voice,
}

/// Generates `.wav` speech files through a remote text-to-speech service.
#[derive(Debug, Clone)]
pub struct SpeechGenerator {
    client: Client,
    base_path: PathBuf,
    speech_url: String,
    voice: Voice,
}

impl SpeechGenerator {
    pub fn new(base_path: impl Into<PathBuf>, speech_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_path: base_path.into(),
            speech_url: speech_url.into(),
            voice: Voice::default(),
        }
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    /// Path of the audio file for `stem`.
    pub fn speech_path(&self, stem: &str) -> PathBuf {
        self.base_path.join(format!("{}.wav", stem))
    }

    /// Synthesises `text` into `<base_path>/<stem>.wav`, replacing any existing file.
    pub async fn generate(&self, stem: &str, text: &str) -> Result<PathBuf, DownloadError> {
        let full_path = self.speech_path(stem);
        info!(%text, path = %full_path.display(), "Downloading speech");

        let payload = SpeechRequest {
            format: "wav",
            text,
            voice: self.voice,
        };
        let response = self
            .client
            .post(&self.speech_url)
            .json(&payload)
            .send()
            .await?;
        save_response(response, &full_path).await?;
        Ok(full_path)
    }

    /// Generates every `(stem, text)` pair whose `.wav` file does not exist yet.
    ///
    /// Anything at that path other than a regular file is not treated as cached.
    ///
    /// Returns the stems that were generated.
    pub async fn generate_multiple<I, S, T>(&self, phrases: I) -> Result<Vec<String>, DownloadError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut generated = Vec::new();
        for (stem, text) in phrases {
            let stem = stem.as_ref();
            let path = self.speech_path(stem);
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {
                    info!(%stem, "Speech already exists");
                    continue;
                }
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(DownloadError::Io {
                        path: path.display().to_string(),
                        source,
                    });
                }
            }
            self.generate(stem, text.as_ref()).await?;
            generated.push(stem.to_string());
        }
        Ok(generated)
    }
}
