/*!
 * Positional alignment of model output to a batch of cues.
 *
 * The model is asked to answer one `<original>|||<translated>` pair per
 * line. Only lines carrying the delimiter count; the text after the first
 * delimiter is the translation. The result always has exactly as many
 * entries as the batch had cues.
 */

/// Separator between original and translated text in model output
pub const PAIR_DELIMITER: &str = "|||";

/// Translated lines of one batch, forced to the batch length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedBatch {
    /// One entry per cue, in order
    pub lines: Vec<String>,

    /// Number of delimited lines found in the response
    pub parsed: usize,
}

impl AlignedBatch {
    /// Entries that had to be filled with an empty string
    pub fn shortfall(&self) -> usize {
        self.lines.len().saturating_sub(self.parsed)
    }

    /// Delimited lines that were thrown away
    pub fn surplus(&self) -> usize {
        self.parsed.saturating_sub(self.lines.len())
    }

    pub fn is_exact(&self) -> bool {
        self.parsed == self.lines.len()
    }
}

/// Extract translations from a raw response and fit them to `expected` entries
pub fn align_response(raw: &str, expected: usize) -> AlignedBatch {
    let parsed_lines: Vec<String> = raw
        .lines()
        .filter_map(|line| line.split_once(PAIR_DELIMITER))
        .map(|(_, translated)| translated.trim().to_string())
        .collect();

    let parsed = parsed_lines.len();
    let mut lines = parsed_lines;
    lines.truncate(expected);
    lines.resize(expected, String::new());

    AlignedBatch { lines, parsed }
}
