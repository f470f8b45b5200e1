/*!
 * Subtitle translation using AI providers.
 *
 * - `core`: translation service, generation trait and token accounting
 * - `batch`: sequential batch translation of cue texts
 * - `alignment`: parsing of `|||` answers into per-cue translations
 * - `prompts`: system prompt template and batch prompt builder
 */

pub use self::alignment::{align_response, AlignedBatch};
pub use self::batch::BatchTranslator;
pub use self::core::{Generation, TextGenerator, TokenUsageStats, TranslationService};
pub use self::prompts::{BatchPromptBuilder, PromptTemplate};

pub mod alignment;
pub mod batch;
pub mod core;
pub mod prompts;
