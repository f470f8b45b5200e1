use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::bilingual;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::metadata::{MetadataResolver, TmdbClient};
use crate::subtitle_processor::CueSequence;
use crate::title_normalizer::normalize_title;
use crate::translation::{BatchTranslator, TextGenerator, TranslationService};

// @module: Application controller for bilingual subtitle generation

/// Name of the failure log written next to processed folders
pub const ISSUES_LOG_FILE: &str = "dualsub.issues.log";

/// Per-run overrides coming from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    // @field: Title used for the metadata lookup instead of the file name
    pub title: Option<String>,

    // @field: Context used verbatim, no lookup at all
    pub context: Option<String>,

    // @field: Replace existing outputs
    pub force_overwrite: bool,
}

/// Result of processing one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Bilingual output was written
    Translated {
        output_path: PathBuf,
        cues: usize,
        dropped_blocks: usize,
    },
    /// Output already existed and overwriting was not requested
    Skipped { output_path: PathBuf },
}

/// Counters of a folder run
#[derive(Debug, Clone, Default)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Failed files with their error message
    pub failures: Vec<(PathBuf, String)>,
}

impl FolderSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Generation backend shared by all files
    generator: Box<dyn TextGenerator>,

    // @field: Context lookup
    resolver: MetadataResolver,

    // @field: Target language name used in prompts, e.g. "Chinese"
    target_language_name: String,
}

impl Controller {
    // @method: Create a controller with the providers described by the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let source_name = language_utils::get_language_name(&config.source_language)?;
        let target_name = language_utils::get_language_name(&config.target_language)?;

        let generator = TranslationService::new(config.translation.clone(), &source_name, &target_name)
            .context("Failed to create translation service")?;

        let placeholder = config.metadata.no_context_placeholder.clone();
        let metadata_key = config.metadata.get_api_key();
        let resolver = if !config.metadata.enabled {
            info!("Metadata lookup disabled");
            MetadataResolver::disabled(placeholder)
        } else if metadata_key.is_empty() {
            info!("No TMDB API key configured, metadata lookup disabled");
            MetadataResolver::disabled(placeholder)
        } else {
            let client = TmdbClient::new(
                metadata_key,
                config.metadata.endpoint.clone(),
                config.metadata.language.clone(),
                config.metadata.timeout_secs,
            );
            MetadataResolver::new(Box::new(client), placeholder)
        };

        Self::with_components(config, Box::new(generator), resolver)
    }

    // @method: Create a controller around an existing generator and resolver
    pub fn with_components(
        config: Config,
        generator: Box<dyn TextGenerator>,
        resolver: MetadataResolver,
    ) -> Result<Self> {
        let target_language_name = language_utils::get_language_name(&config.target_language)?;

        Ok(Self {
            config,
            generator,
            resolver,
            target_language_name,
        })
    }

    /// Output path for an input file under the configured suffix
    pub fn output_path_for(&self, input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, &self.config.output_suffix())
    }

    /// Process a single subtitle file
    pub async fn run(&self, input_file: PathBuf, options: &RunOptions) -> Result<FileOutcome> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        info!(
            "DualSub: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model()
        );

        let multi_progress = MultiProgress::new();
        let outcome = self.process_file(&input_file, options, &multi_progress).await?;
        Ok(outcome)
    }

    /// Process every subtitle file below a directory
    ///
    /// A failing file is logged and recorded; the remaining files still run.
    pub async fn run_folder(&self, input_dir: PathBuf, options: &RunOptions) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_subtitle_files(&input_dir, &self.config.output_suffix())?;
        if files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        info!(
            "DualSub: {} - {} ({} files)",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model(),
            files.len()
        );

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        folder_pb.set_style(Self::progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for file in &files {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.process_file(file, options, &multi_progress).await {
                Ok(FileOutcome::Translated { .. }) => summary.processed += 1,
                Ok(FileOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                    summary.failures.push((file.clone(), e.to_string()));
                },
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} failed in {}",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        if !summary.failures.is_empty() {
            let log_file_path = input_dir.join(ISSUES_LOG_FILE);
            match self.write_issues_log(&log_file_path, &summary) {
                Ok(()) => info!("Failures written to {}", log_file_path.display()),
                Err(e) => warn!("Failed to write issues log: {}", e),
            }
        }

        Ok(summary)
    }

    /// Context for a file: explicit override, else overview of the resolved title
    pub async fn resolve_context(&self, input_file: &Path, options: &RunOptions) -> String {
        if let Some(context) = &options.context {
            debug!("Using context supplied on the command line");
            return context.clone();
        }

        let title = match &options.title {
            Some(title) => title.clone(),
            None => normalize_title(&input_file.to_string_lossy()),
        };
        debug!("Metadata title for {:?}: '{}'", input_file, title);

        self.resolver.context_for(&title).await
    }

    /// Parse, translate and assemble one file
    async fn process_file(
        &self,
        input_file: &Path,
        options: &RunOptions,
        multi_progress: &MultiProgress,
    ) -> Result<FileOutcome, AppError> {
        let start_time = Instant::now();

        let output_path = self.output_path_for(input_file);
        if output_path.exists() && !options.force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input_file);
            return Ok(FileOutcome::Skipped { output_path });
        }

        let content = FileManager::read_to_string_lossy(input_file)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        let sequence = CueSequence::parse(&content);
        if sequence.dropped_blocks > 0 {
            warn!("Dropped {} malformed block(s) in {:?}", sequence.dropped_blocks, input_file);
        }
        if sequence.is_empty() {
            warn!("No subtitle cues found in {:?}", input_file);
        }

        let context = self.resolve_context(input_file, options).await;

        let translator = BatchTranslator::new(
            self.generator.as_ref(),
            self.config.translation.get_batch_size(),
            &self.target_language_name,
        );

        let progress_bar = multi_progress.add(ProgressBar::new(translator.batch_count(sequence.len()) as u64));
        progress_bar.set_style(Self::progress_style("batches"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let result = translator
            .translate(&sequence.texts(), &context, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        // Only the folder bar stays visible between files
        progress_bar.finish_and_clear();
        let (translations, token_usage) = result?;

        let output = bilingual::assemble(&sequence.cues, &translations);
        FileManager::write_to_file(&output_path, &output)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        if token_usage.total_tokens > 0 {
            debug!("{}", token_usage.summary());
        }
        info!(
            "Success: {} ({} cues, {})",
            output_path.display(),
            sequence.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(FileOutcome::Translated {
            output_path,
            cues: sequence.len(),
            dropped_blocks: sequence.dropped_blocks,
        })
    }

    fn write_issues_log(&self, log_file_path: &Path, summary: &FolderSummary) -> Result<()> {
        let header = format!(
            "{} - {}: {} of {} files failed",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model(),
            summary.failed,
            summary.total()
        );
        FileManager::append_to_log_file(log_file_path, &header)?;

        for (path, message) in &summary.failures {
            FileManager::append_to_log_file(log_file_path, &format!("{}: {}", path.display(), message))?;
        }
        Ok(())
    }

    fn progress_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    // Format duration in a human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
