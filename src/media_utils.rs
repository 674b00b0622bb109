use std::path::Path;

use anyhow::{Result, anyhow};
use log::{debug, error};
use tokio::process::Command;

// @module: Audio extraction from video files

/// Timeout for a single ffmpeg invocation
const FFMPEG_TIMEOUT_SECS: u64 = 300;

/// Extract the audio track of a video into a mono 16 kHz PCM WAV file.
///
/// This is the input format the speech-to-text backends expect. The ffmpeg
/// invocation runs with a hard timeout to avoid hanging on problematic
/// files.
pub async fn extract_audio<P: AsRef<Path>>(video_path: P, audio_path: P) -> Result<()> {
    let video_path = video_path.as_ref();
    let audio_path = audio_path.as_ref();

    if !video_path.exists() {
        return Err(anyhow!("Video file does not exist: {}", video_path.display()));
    }

    debug!(
        "Extracting audio from {} to {}",
        video_path.display(),
        audio_path.display()
    );

    let ffmpeg_future = Command::new("ffmpeg")
        .args([
            "-y", // Overwrite existing file
            "-i",
            video_path.to_str().unwrap_or_default(),
            "-vn",
            "-acodec",
            "pcm_s16le",
            "-ac",
            "1",
            "-ar",
            "16000",
            audio_path.to_str().unwrap_or_default(),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(FFMPEG_TIMEOUT_SECS);
    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg command for audio extraction: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffmpeg command timed out after {} seconds", FFMPEG_TIMEOUT_SECS));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Audio extraction failed: {}", filtered);
        return Err(anyhow!("ffmpeg extraction failed: {}", filtered));
    }

    let file_size = std::fs::metadata(audio_path)
        .map_err(|_| anyhow!("Audio extraction produced no output file"))?
        .len();
    if file_size == 0 {
        return Err(anyhow!("Extracted audio file is empty"));
    }

    debug!("Audio extraction complete: {} bytes", file_size);
    Ok(())
}

/// Strip ffmpeg's banner and stream chatter from stderr, keeping the lines
/// that explain a failure
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Output #",
        "Metadata:",
        "Duration:",
        "Stream #",
        "Stream mapping:",
        "Press [q]",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !noise_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
