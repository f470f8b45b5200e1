/*!
 * Prompt construction for batch subtitle translation.
 *
 * A batch prompt carries the work context, the output contract
 * (`<original>|||<translated>`, one line per input line) and the numbered
 * cue texts.
 */


use super::alignment::PAIR_DELIMITER;

/// System prompt template with `{source_language}`/`{target_language}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template with the given language names.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

/// Builder for one batch's user prompt
#[derive(Debug, Clone)]
pub struct BatchPromptBuilder {
    target_language: String,
    context: String,
    lines: Vec<String>,
}

impl BatchPromptBuilder {
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            context: String::new(),
            lines: Vec::new(),
        }
    }

    /// Set the work summary used for disambiguation.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    /// Set the cue texts of the batch.
    pub fn with_lines(mut self, lines: &[String]) -> Self {
        self.lines = lines.to_vec();
        self
    }

    /// Build the user prompt.
    pub fn build(&self) -> String {
        let mut prompt = format!(
            "The following lines are dialogue from a film or TV series. Background summary: {}\n\
             Translate every line into {} separately. Keep exactly {} lines in the same order; do not merge, split, skip or reorder lines.\n\
             Answer with one line per input line using the format: original{}translation\n\n",
            self.context,
            self.target_language,
            self.lines.len(),
            PAIR_DELIMITER
        );

        for (position, line) in self.lines.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", position + 1, line));
        }

        prompt
    }
}
