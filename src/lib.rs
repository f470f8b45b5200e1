/*!
 * # DualSub - bilingual subtitles with AI
 *
 * A Rust library that turns English SRT subtitles into bilingual SRT files,
 * keeping every original line and adding its AI translation below it.
 *
 * ## Features
 *
 * - Title cleanup of release-style file names
 * - Plot summary lookup on TMDB (films first, then series), used as context
 * - Tolerant SRT block parsing
 * - Batched translation using various AI providers:
 *   - OpenAI API
 *   - Anthropic API
 *   - Ollama (local LLM)
 * - Strict per-batch line alignment with padding and truncation
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * - `title_normalizer`: file name to search title
 * - `metadata`: catalog trait, TMDB client and context resolver
 * - `subtitle_processor`: SRT blocks to cues
 * - `translation`: translation service, batching and answer alignment
 * - `bilingual`: cues plus translations to bilingual SRT text
 * - `providers`: client implementations for the LLM providers
 * - `app_config`, `app_controller`, `file_utils`, `language_utils`, `errors`
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod app_config;
pub mod app_controller;
pub mod bilingual;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod metadata;
pub mod providers;
pub mod subtitle_processor;
pub mod title_normalizer;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FileOutcome, FolderSummary, RunOptions};
pub use errors::{AppError, MetadataError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use metadata::{Catalog, CatalogEntry, EntryKind, MetadataResolver};
pub use subtitle_processor::{Cue, CueSequence};
pub use title_normalizer::normalize_title;
pub use translation::{BatchTranslator, TextGenerator, TranslationService};
