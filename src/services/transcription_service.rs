use crate::config::TranscriptionConfig;
use crate::error::{Error, Result};
use crate::utils::upload::TempFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;

pub const DEFAULT_LANGUAGE: &str = "en-US";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// `language` is a locale such as `en-US`.
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Speech-to-text over an OpenAI-compatible `/audio/transcriptions` endpoint.
#[derive(Clone)]
pub struct TranscriptionService {
    client: Client,
    config: TranscriptionConfig,
}

impl TranscriptionService {
    pub fn new(config: TranscriptionConfig, client: Client) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Transcriber for TranscriptionService {
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            Error::Config(
                "Transcription API key is missing. Set TRANSCRIPTION_API_KEY in the environment."
                    .to_string(),
            )
        })?;

        let data = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let form = Form::new()
            .text("model", self.config.model.clone())
            .text("language", language_code(language).to_string())
            .part("file", Part::bytes(data).file_name(file_name));

        let res = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Transcription(e.without_url().to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!(%status, "Transcription API error: {}", text);
            return Err(Error::Transcription(format!("Speech API returned {}", status)));
        }

        let body: TranscriptionResponse = res
            .json()
            .await
            .map_err(|e| Error::Transcription(e.without_url().to_string()))?;
        Ok(body.text)
    }
}

/// Extracts the audio track with `ffmpeg` into a request-scoped wav file,
/// transcribes it, and removes the wav again.
pub async fn video_to_text(
    transcriber: &dyn Transcriber,
    video_path: &Path,
    scratch_dir: &Path,
    request_id: &str,
    language: &str,
) -> Result<String> {
    let audio = TempFile::reserve(scratch_dir, &format!("{}-audio.wav", request_id));

    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(video_path)
        .arg("-vn")
        .args(["-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1"])
        .arg(audio.path())
        .output()
        .await
        .map_err(|e| Error::Transcription(format!("Failed to run ffmpeg: {}", e)))?;

    if !output.status.success() {
        tracing::error!("ffmpeg failed: {}", String::from_utf8_lossy(&output.stderr));
        return Err(Error::Transcription("Failed to process the video.".to_string()));
    }
    tracing::info!(path = %audio.path().display(), "Audio extracted from video");

    transcriber.transcribe(audio.path(), language).await
}

/// `en-US` -> `en`; the speech API takes ISO-639-1 codes.
fn language_code(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}
