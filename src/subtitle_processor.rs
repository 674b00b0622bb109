use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @module: Segment store and subtitle export

// @const: Music/silence markers excluded from translation
static PLACEHOLDER_MARKERS: &[&str] = &["(Music)", "(Âm nhạc)", "[Music]", "(Silence)"];

// @const: Caption fully wrapped in music notes
static MUSIC_NOTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^♪+[^♪]*♪+$").unwrap()
});

/// A single timed caption segment.
///
/// Segments are value objects: translation never mutates a segment in place,
/// it produces new values carrying translated text but identical timing.
/// Upstream transcription may emit segments with `start >= end`; those are
/// tolerated and carried through with whatever text they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Caption text
    pub text: String,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether this segment is a non-speech placeholder.
    ///
    /// Placeholders are excluded from translation requests and copied into
    /// the output unchanged: trimmed-empty text, a recognized music/silence
    /// marker, or a caption fully wrapped in music notes.
    pub fn is_placeholder(&self) -> bool {
        let trimmed = self.text.trim();
        trimmed.is_empty()
            || PLACEHOLDER_MARKERS.contains(&trimmed)
            || MUSIC_NOTE_REGEX.is_match(trimmed)
    }

    /// Format a time in seconds as an SRT timestamp (HH:MM:SS,mmm)
    pub fn format_timestamp_srt(seconds: f64) -> String {
        let (hours, minutes, secs, millis) = Self::split_timestamp(seconds);
        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }

    /// Format a time in seconds as a WebVTT timestamp (HH:MM:SS.mmm)
    pub fn format_timestamp_vtt(seconds: f64) -> String {
        let (hours, minutes, secs, millis) = Self::split_timestamp(seconds);
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
    }

    fn split_timestamp(seconds: f64) -> (u64, u64, u64, u64) {
        // Negative times can not appear in subtitle files; clamp instead of wrapping
        let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let secs = (total_millis % 60_000) / 1_000;
        let millis = total_millis % 1_000;
        (hours, minutes, secs, millis)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} --> {}: {}",
            Self::format_timestamp_srt(self.start),
            Self::format_timestamp_srt(self.end),
            self.text
        )
    }
}

/// Ordered collection of caption segments with metadata
#[derive(Debug, Clone)]
pub struct SegmentCollection {
    /// Source file the segments were produced from, if any
    pub source_file: Option<PathBuf>,

    /// List of caption segments, position-significant
    pub segments: Vec<Segment>,
}

impl SegmentCollection {
    /// Create a new collection from a list of segments
    pub fn new(segments: Vec<Segment>) -> Self {
        SegmentCollection {
            source_file: None,
            segments,
        }
    }

    /// Create a collection tagged with its source file
    pub fn with_source_file(segments: Vec<Segment>, source_file: PathBuf) -> Self {
        SegmentCollection {
            source_file: Some(source_file),
            segments,
        }
    }

    /// Load segments from a JSON transcript file (an array of {start, end, text})
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;

        let segments: Vec<Segment> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse transcript file: {}", path.display()))?;

        if segments.is_empty() {
            warn!("Transcript file {} contains no segments", path.display());
        }

        Ok(SegmentCollection::with_source_file(segments, path.to_path_buf()))
    }

    /// Write segments to a SubRip (.srt) file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = self.create_output_file(path.as_ref())?;

        for (index, segment) in self.segments.iter().enumerate() {
            writeln!(file, "{}", index + 1)?;
            writeln!(
                file,
                "{} --> {}",
                Segment::format_timestamp_srt(segment.start),
                Segment::format_timestamp_srt(segment.end)
            )?;
            writeln!(file, "{}", segment.text)?;
            writeln!(file)?;
        }

        Ok(())
    }

    /// Write segments to a WebVTT (.vtt) file
    pub fn write_to_vtt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = self.create_output_file(path.as_ref())?;

        writeln!(file, "WEBVTT")?;
        writeln!(file)?;

        for (index, segment) in self.segments.iter().enumerate() {
            writeln!(file, "cue-{}", index + 1)?;
            writeln!(
                file,
                "{} --> {}",
                Segment::format_timestamp_vtt(segment.start),
                Segment::format_timestamp_vtt(segment.end)
            )?;
            writeln!(file, "{}", segment.text)?;
            writeln!(file)?;
        }

        Ok(())
    }

    /// Write segments to a JSON file as an array of {start, end, text}
    pub fn write_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = self.create_output_file(path.as_ref())?;

        let json = serde_json::to_string_pretty(&self.segments)
            .context("Failed to serialize segments to JSON")?;
        file.write_all(json.as_bytes())?;
        writeln!(file)?;

        Ok(())
    }

    /// Write segments in the format implied by the output path extension
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "srt" => self.write_to_srt(path),
            "vtt" => self.write_to_vtt(path),
            "json" => self.write_to_json(path),
            other => Err(anyhow!("Unsupported subtitle format: .{}", other)),
        }
    }

    fn create_output_file(&self, path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))
    }

    /// Number of segments in the collection
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the collection holds no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
