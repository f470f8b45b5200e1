/*!
 * Batch translation of cue texts.
 *
 * Texts are cut into consecutive batches, each batch is sent as one prompt
 * and the answer is aligned back to the batch length, so the output always
 * has exactly one translation per input text.
 */

use log::{debug, warn};

use crate::errors::TranslationError;

use super::alignment::align_response;
use super::core::{TextGenerator, TokenUsageStats};
use super::prompts::BatchPromptBuilder;

/// Sequential batch translator over any text generator
pub struct BatchTranslator<'a, G: TextGenerator + ?Sized> {
    /// Generation backend
    generator: &'a G,
    /// Maximum cue texts per request
    batch_size: usize,
    /// Target language name used in the prompt
    target_language: String,
}

impl<'a, G: TextGenerator + ?Sized> BatchTranslator<'a, G> {
    /// Create a translator; a batch size of 0 is treated as 1
    pub fn new(generator: &'a G, batch_size: usize, target_language: &str) -> Self {
        Self {
            generator,
            batch_size: batch_size.max(1),
            target_language: target_language.to_string(),
        }
    }

    /// Effective batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of requests needed for `count` texts
    pub fn batch_count(&self, count: usize) -> usize {
        count.div_ceil(self.batch_size)
    }

    /// Translate all texts, one batch at a time, in order
    ///
    /// `progress_callback` receives `(completed_batches, total_batches)` after
    /// every batch. The first failing batch aborts the whole run.
    pub async fn translate<F>(
        &self,
        texts: &[String],
        context: &str,
        progress_callback: F,
    ) -> Result<(Vec<String>, TokenUsageStats), TranslationError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let mut stats = TokenUsageStats::with_provider_info(
            self.generator.provider_name(),
            self.generator.model_name(),
        );
        let total = self.batch_count(texts.len());
        let mut translations = Vec::with_capacity(texts.len());

        for (batch_index, chunk) in texts.chunks(self.batch_size).enumerate() {
            let prompt = BatchPromptBuilder::new(&self.target_language)
                .with_context(context)
                .with_lines(chunk)
                .build();

            let generation = self.generator.generate(&prompt).await.map_err(|e| {
                TranslationError::BatchFailed {
                    batch: batch_index + 1,
                    total,
                    source: Box::new(e),
                }
            })?;
            stats.record(&generation);

            let aligned = align_response(&generation.text, chunk.len());
            if aligned.shortfall() > 0 {
                warn!(
                    "Batch {}/{}: got {} of {} lines, padding {} with empty translations",
                    batch_index + 1, total, aligned.parsed, chunk.len(), aligned.shortfall()
                );
            } else if aligned.surplus() > 0 {
                warn!(
                    "Batch {}/{}: got {} lines for {} cues, dropping {} extra",
                    batch_index + 1, total, aligned.parsed, chunk.len(), aligned.surplus()
                );
            } else {
                debug!("Batch {}/{}: {} lines aligned", batch_index + 1, total, chunk.len());
            }

            translations.extend(aligned.lines);
            progress_callback(batch_index + 1, total);
        }

        Ok((translations, stats))
    }
}
