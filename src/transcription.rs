use std::path::Path;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

use crate::app_config::TranscriptionConfig;
use crate::subtitle_processor::{Segment, SegmentCollection};

// @module: Speech-to-text API client

/// One timed segment in a verbose transcription response
#[derive(Deserialize, Debug)]
struct TranscriptionSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Successful verbose_json transcription response
#[derive(Deserialize, Debug)]
struct TranscriptionResponse {
    #[serde(default)]
    segments: Option<Vec<TranscriptionSegment>>,
}

/// Client for an OpenAI-compatible audio transcription endpoint
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    client: Client,
    config: TranscriptionConfig,
}

impl TranscriptionClient {
    /// Create a new transcription client
    pub fn new(config: TranscriptionConfig) -> Self {
        TranscriptionClient {
            client: Client::new(),
            config,
        }
    }

    /// Upload an audio file and return the recognized timed segments.
    ///
    /// The file is streamed from disk rather than read into memory, and the
    /// request asks for `verbose_json` so the response carries per-segment
    /// timestamps.
    pub async fn transcribe_file(&self, audio_path: &Path) -> Result<SegmentCollection> {
        let url = format!(
            "{}/v1/audio/transcriptions",
            self.config.endpoint.trim_end_matches('/')
        );

        let file_name = audio_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mime_type = match audio_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("wav") => "audio/wav",
            Some("ogg") | Some("opus") => "audio/ogg",
            Some("mp3") => "audio/mpeg",
            Some("m4a") => "audio/mp4",
            _ => "audio/wav",
        };

        debug!("Uploading {} to {}", audio_path.display(), url);

        let file = File::open(audio_path).await?;
        let stream = FramedRead::new(file, BytesCodec::new());
        let file_part = reqwest::multipart::Part::stream(reqwest::Body::wrap_stream(stream))
            .file_name(file_name)
            .mime_str(mime_type)?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        if !self.config.language.trim().is_empty() {
            form = form.text("language", self.config.language.clone());
        }

        let mut request = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(Duration::from_secs(self.config.timeout_secs));

        if !self.config.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(anyhow!(format_api_error(status, &text)));
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&text)
            .map_err(|_| anyhow!("Failed to parse transcription response: {}", text))?;

        let segments: Vec<Segment> = parsed
            .segments
            .ok_or_else(|| anyhow!("No segments in transcription response (verbose_json required)"))?
            .into_iter()
            .map(|s| Segment::new(s.start, s.end, s.text.trim()))
            .collect();

        info!("Transcription complete: {} segments identified", segments.len());
        Ok(SegmentCollection::with_source_file(
            segments,
            audio_path.to_path_buf(),
        ))
    }
}

/// Format an API error response into readable log text
fn format_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(obj) = value.as_object() {
            let code = obj.get("code").and_then(|v| v.as_i64());
            let message = obj.get("message").and_then(|v| v.as_str());

            if code.is_some() || message.is_some() {
                return format!(
                    "API Error (HTTP {}, code {:?}): {}",
                    status,
                    code,
                    message.unwrap_or("")
                )
                .trim()
                .to_string();
            }
        } else if let Some(text) = value.as_str() {
            return format!("API Error (HTTP {}): {}", status, text);
        }
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return format!("Rate limited (HTTP 429): {}", body);
    }

    format!("API Error (HTTP {}): {}", status, body)
}
