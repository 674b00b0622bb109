// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};

use crate::app_config::Config;
use crate::providers::gemini::Gemini;
use crate::subtitle_processor::SegmentCollection;
use crate::transcription::TranscriptionClient;
use crate::translation::{TranslationEngine, TranslationEvent};

mod app_config;
mod errors;
mod language_utils;
mod media_utils;
mod providers;
mod subtitle_processor;
mod transcription;
mod translation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl From<app_config::LogLevel> for LevelFilter {
    fn from(level: app_config::LogLevel) -> Self {
        match level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe a video's audio track into a timed transcript
    Transcribe(TranscribeArgs),

    /// Translate a transcript and export it as subtitles
    Translate(TranslateArgs),

    /// Generate shell completions for subgen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Input video file to process
    #[arg(value_name = "VIDEO_PATH")]
    video_path: PathBuf,

    /// Output transcript path (.json, .srt or .vtt; defaults to <video>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input transcript file (JSON array of {start, end, text})
    #[arg(value_name = "TRANSCRIPT_PATH")]
    transcript_path: PathBuf,

    /// Target language (name or ISO code, e.g. 'vietnamese', 'vi')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Output subtitle path (.srt, .vtt or .json; defaults to <transcript>.<lang>.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subgen - AI-powered subtitle generation and translation
///
/// Transcribes video audio into timed captions and translates them with a
/// prompt-based LLM API, exporting SubRip, WebVTT or JSON.
#[derive(Parser, Debug)]
#[command(name = "subgen")]
#[command(version)]
#[command(about = "AI-powered subtitle generation and translation")]
#[command(long_about = "subgen extracts a video's audio with ffmpeg, transcribes it through a \
speech-to-text endpoint and translates the captions in batches with the Gemini API.

EXAMPLES:
    subgen transcribe movie.mkv                    # Transcript to movie.json
    subgen transcribe movie.mkv -o movie.srt       # Transcript straight to SRT
    subgen translate movie.json -t vietnamese      # Translate to movie.vi.srt
    subgen translate movie.json -t en -o out.vtt   # Translate and export WebVTT
    subgen completions bash > subgen.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0m",
            Level::Debug => "\x1B[0;36m",
            Level::Trace => "\x1B[0;90m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subgen", &mut std::io::stdout());
            Ok(())
        }
        Commands::Transcribe(args) => run_transcribe(args).await,
        Commands::Translate(args) => run_translate(args).await,
    }
}

/// Load the configuration file, creating a default one when missing
fn load_or_create_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    if let Some(cmd_log_level) = &log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    config.validate().context("Configuration validation failed")?;

    if log_level.is_none() {
        log::set_max_level(config.log_level.clone().into());
    }

    Ok(config)
}

async fn run_transcribe(args: TranscribeArgs) -> Result<()> {
    let config = load_or_create_config(&args.config_path, args.log_level)?;

    let output_path = args
        .output
        .unwrap_or_else(|| args.video_path.with_extension("json"));

    // Extract audio into a temp dir that cleans itself up
    let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
    let audio_path = temp_dir.path().join("audio.wav");

    info!("Extracting audio from {}", args.video_path.display());
    media_utils::extract_audio(args.video_path.as_path(), audio_path.as_path()).await?;

    info!("Transcribing audio (this may take a while)...");
    let client = TranscriptionClient::new(config.transcription);
    let collection = client.transcribe_file(&audio_path).await?;

    if collection.is_empty() {
        return Err(anyhow!("No speech detected in the audio"));
    }

    collection.write_to_path(&output_path)?;
    info!(
        "Wrote {} segments to {}",
        collection.len(),
        output_path.display()
    );

    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let config = load_or_create_config(&args.config_path, args.log_level)?;

    let target_language = args
        .target_language
        .unwrap_or_else(|| config.target_language.clone());
    let language = language_utils::TargetLanguage::parse(&target_language)?;

    let output_path = args.output.unwrap_or_else(|| {
        let stem = args
            .transcript_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "subtitles".to_string());
        args.transcript_path
            .with_file_name(format!("{}.{}.srt", stem, language.code()))
    });

    let collection = SegmentCollection::from_json_file(&args.transcript_path)?;
    info!(
        "Translating {} segments to {}",
        collection.len(),
        language.display_name()
    );

    let provider = Arc::new(Gemini::new(&config.translation));
    let engine = TranslationEngine::with_batch_size(provider, config.translation.batch_size);

    // Ctrl-C cancels new batch attempts; finished work is kept
    let cancellation = engine.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancellation requested, finishing current batch...");
            cancellation.cancel();
        }
    });

    let progress_bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));
    progress_bar.set_message("Translating");

    let mut events = engine.spawn_job(collection.segments.clone(), target_language);
    let translated = loop {
        match events.recv().await {
            Some(TranslationEvent::Progress { current, .. }) => {
                progress_bar.set_position(current as u64);
            }
            Some(TranslationEvent::Completed(segments)) => {
                progress_bar.finish_and_clear();
                break segments;
            }
            Some(TranslationEvent::Failed(message)) => {
                progress_bar.finish_and_clear();
                return Err(anyhow!("Translation failed: {}", message));
            }
            None => {
                progress_bar.finish_and_clear();
                return Err(anyhow!("Translation job ended without a result"));
            }
        }
    };

    let output = SegmentCollection::new(translated);
    output.write_to_path(&output_path)?;
    info!("Wrote {} segments to {}", output.len(), output_path.display());

    Ok(())
}
