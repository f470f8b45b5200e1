/*!
 * Bilingual subtitle assembly.
 *
 * Writes every cue back in SRT block grammar with a fresh sequential index,
 * the untouched time range, the original line and the translated line
 * beneath it.
 */

use crate::subtitle_processor::Cue;

/// Serialize cues and their translations into a bilingual SRT stream
///
/// `translations[i]` belongs to `cues[i]`. A missing translation omits the
/// line but keeps the block separator.
pub fn assemble(cues: &[Cue], translations: &[String]) -> String {
    let mut output = String::new();

    for (position, cue) in cues.iter().enumerate() {
        output.push_str(&format!("{}\n{}\n{}\n", position + 1, cue.time_range, cue.text));
        if let Some(translated) = translations.get(position) {
            output.push_str(translated);
            output.push('\n');
        }
        output.push('\n');
    }

    output
}
