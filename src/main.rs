#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use dualsub::app_config::{Config, LogLevel, TranslationProvider};
use dualsub::app_controller::{Controller, FileOutcome, RunOptions};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
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

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for dualsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// DualSub - bilingual subtitles with AI
///
/// Translates English SRT subtitles and writes files that carry the original
/// line and its translation in every block.
#[derive(Parser, Debug)]
#[command(name = "dualsub")]
#[command(version)]
#[command(about = "AI-powered bilingual subtitle generator")]
#[command(long_about = "DualSub translates SRT subtitles with an AI provider and writes bilingual SRT files.
A plot summary looked up on TMDB is sent along as context.

EXAMPLES:
    dualsub movie.srt                             # Translate using default config
    dualsub -f movie.srt                          # Force overwrite existing output
    dualsub -p anthropic movie.srt                # Use a specific provider
    dualsub -t ja --title \"Inception\" movie.srt   # Japanese, explicit lookup title
    dualsub --no-metadata /subtitles/             # Whole directory, no TMDB lookup
    dualsub completions bash > dualsub.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created. API keys may also come from the
    OPENAI_API_KEY, ANTHROPIC_API_KEY and TMDB_API_KEY environment variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'zh', 'ja', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Number of subtitle lines sent per request
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Title used for the metadata lookup instead of the file name
    #[arg(long)]
    title: Option<String>,

    /// Context sent with every batch, skips the metadata lookup
    #[arg(long, conflicts_with = "title")]
    context: Option<String>,

    /// Do not look the title up on TMDB
    #[arg(long)]
    no_metadata: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // Level is adjusted later through log::set_max_level
        let logger = Box::new(CustomLogger { level: LevelFilter::Trace });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => ("ℹ️  ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "dualsub", &mut std::io::stdout());
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Apply command line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &CommandLineOptions) {
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &cli.model {
        config.translation.get_active_provider_config_mut().model = model.clone();
    }
    if let Some(source_language) = &cli.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &cli.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(batch_size) = cli.batch_size {
        config.translation.common.batch_size = batch_size;
    }
    if cli.no_metadata {
        config.metadata.enabled = false;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    // Command line level first so config loading is logged at the right level
    if let Some(log_level) = &cli.log_level {
        log::set_max_level(LogLevel::from(log_level.clone()).to_level_filter());
    }

    let input_path = cli.input_path.clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required"))?;

    let (mut config, created) = Config::load_or_create(&cli.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config_path);
    }
    apply_overrides(&mut config, &cli);
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;
    if config.translation.common.batch_size == 0 {
        warn!("Batch size 0 is not usable, sending one line per request");
    }

    let options = RunOptions {
        title: cli.title.clone(),
        context: cli.context.clone(),
        force_overwrite: cli.force_overwrite,
    };

    let controller = Controller::with_config(config)?;

    if input_path.is_file() {
        match controller.run(input_path, &options).await? {
            FileOutcome::Translated { output_path, .. } => info!("Output: {}", output_path.display()),
            FileOutcome::Skipped { output_path } => info!("Kept existing output: {}", output_path.display()),
        }
    } else if input_path.is_dir() {
        let summary = controller.run_folder(input_path, &options).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} of {} files failed", summary.failed, summary.total()));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
