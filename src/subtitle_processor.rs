use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

// @module: Subtitle block parsing

// @const: Blank-line block separator, whitespace-only lines included
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n[ \t\r]*\r?\n(?:[ \t\r]*\r?\n)*").unwrap()
});

// @const: Token separating start and end timecodes
pub const TIME_RANGE_DELIMITER: &str = "-->";

// @struct: Single timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Original ordinal, advisory only
    pub index: Option<String>,

    // @field: Verbatim "<start> --> <end>" line
    pub time_range: String,

    // @field: Single-line text payload
    pub text: String,
}

impl Cue {
    pub fn new(index: Option<String>, time_range: impl Into<String>, text: impl Into<String>) -> Self {
        Cue {
            index,
            time_range: time_range.into(),
            text: text.into(),
        }
    }

    // @parses: One raw block, None when the block is not a usable cue
    fn from_block(block: &str) -> Option<Self> {
        let lines: Vec<&str> = block
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() < 2 {
            return None;
        }

        let first = lines[0].trim();
        let index = if !first.is_empty() && first.chars().all(|c| c.is_ascii_digit()) {
            Some(first.to_string())
        } else {
            None
        };

        let mut time_range = None;
        let mut text_lines = Vec::new();
        for line in &lines[1..] {
            if line.contains(TIME_RANGE_DELIMITER) {
                // Last time range in the block wins
                time_range = Some(line.trim().to_string());
            } else {
                text_lines.push(line.trim());
            }
        }

        let text = text_lines.join(" ");
        match time_range {
            Some(time_range) if !text.is_empty() => Some(Cue { index, time_range, text }),
            _ => None,
        }
    }
}

/// Ordered cues of one subtitle file
#[derive(Debug, Clone, Default)]
pub struct CueSequence {
    pub cues: Vec<Cue>,

    /// Blocks that were discarded while parsing
    pub dropped_blocks: usize,
}

impl CueSequence {
    /// Parse the full text of a subtitle file
    ///
    /// Malformed blocks are dropped rather than reported; this never fails.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut sequence = CueSequence::default();

        for block in BLOCK_SEPARATOR_REGEX.split(content.trim()) {
            if block.trim().is_empty() {
                continue;
            }
            match Cue::from_block(block) {
                Some(cue) => sequence.cues.push(cue),
                None => {
                    sequence.dropped_blocks += 1;
                    debug!("Dropping malformed subtitle block: {:?}", block.lines().next().unwrap_or(""));
                }
            }
        }

        sequence
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Text payloads in cue order
    pub fn texts(&self) -> Vec<String> {
        self.cues.iter().map(|cue| cue.text.clone()).collect()
    }
}
