// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, ScorerProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod providers;
mod render;
mod story_processor;
mod trajectory;

/// CLI Wrapper for ScorerProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliScorerProvider {
    Inference,
    Mock,
}

impl From<CliScorerProvider> for ScorerProvider {
    fn from(cli_provider: CliScorerProvider) -> Self {
        match cli_provider {
            CliScorerProvider::Inference => ScorerProvider::Inference,
            CliScorerProvider::Mock => ScorerProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the emotional trajectory of a story and render it (default command)
    Shape(ShapeArgs),

    /// Generate shell completions for storyshape
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ShapeArgs {
    /// Story text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing shape files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Sentiment provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliScorerProvider>,

    /// Model name to use for sentiment classification
    #[arg(short, long)]
    model: Option<String>,

    /// Token budget per segment
    #[arg(long)]
    segment_length: Option<usize>,

    /// Rolling window length in segments
    #[arg(short, long)]
    window_length: Option<usize>,

    /// Window advance stride in segments
    #[arg(long)]
    stride: Option<usize>,

    /// Title drawn on the rendered shape (defaults to the file name)
    #[arg(short, long)]
    title: Option<String>,

    /// Output directory for the rendered shape (defaults to the story's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// storyshape - Story Shapes from Sentiment Trajectories
///
/// Splits a narrative text into token-bounded segments, scores each segment
/// with an AI sentiment classifier, and renders the smoothed emotional
/// trajectory as an SVG story shape.
#[derive(Parser, Debug)]
#[command(name = "storyshape")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered story shape generator")]
#[command(long_about = "storyshape derives the emotional trajectory of a narrative text by scoring
token-bounded segments with an AI sentiment classifier and smoothing the
result into a story-shape curve.

EXAMPLES:
    storyshape beowulf.txt                      # Shape using default config
    storyshape -f beowulf.txt                   # Force overwrite existing shape
    storyshape -p mock beowulf.txt              # Dry run without a live endpoint
    storyshape -w 10 --stride 2 beowulf.txt     # Wider, strided smoothing window
    storyshape -t 'Beowulf' beowulf.txt         # Custom title on the shape
    storyshape --log-level debug /stories/      # Process a directory of stories
    storyshape completions bash > storyshape.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

SUPPORTED PROVIDERS:
    inference - text-classification inference endpoint (HuggingFace-style)
    mock      - offline mock scorer, every segment scores positive")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Story text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing shape files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Sentiment provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliScorerProvider>,

    /// Model name to use for sentiment classification
    #[arg(short, long)]
    model: Option<String>,

    /// Token budget per segment
    #[arg(long)]
    segment_length: Option<usize>,

    /// Rolling window length in segments
    #[arg(short, long)]
    window_length: Option<usize>,

    /// Window advance stride in segments
    #[arg(long)]
    stride: Option<usize>,

    /// Title drawn on the rendered shape (defaults to the file name)
    #[arg(short, long)]
    title: Option<String>,

    /// Output directory for the rendered shape (defaults to the story's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }

    // @returns: Emoji for log level
    fn emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let emoji = Self::emoji_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "storyshape", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Shape(args)) => run_shape(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let shape_args = ShapeArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                model: cli.model,
                segment_length: cli.segment_length,
                window_length: cli.window_length,
                stride: cli.stride,
                title: cli.title,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_shape(shape_args).await
        }
    }
}

async fn run_shape(options: ShapeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.write_to_file(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.scorer.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.scorer.model = model.clone();
    }
    if let Some(segment_length) = options.segment_length {
        config.segment_length = segment_length;
    }
    if let Some(window_length) = options.window_length {
        config.window_length = window_length;
    }
    if let Some(stride) = options.stride {
        config.stride = stride;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options
                .input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        controller
            .run(
                options.input_path.clone(),
                output_dir,
                options.title.as_deref(),
                options.force_overwrite,
            )
            .await
    } else if options.input_path.is_dir() {
        if options.title.is_some() {
            warn!("--title is ignored when processing a directory");
        }
        controller
            .run_folder(options.input_path.clone(), options.force_overwrite)
            .await
    } else {
        Err(anyhow!(
            "Input path does not exist: {:?}",
            options.input_path
        ))
    }
}
