/*!
 * Work title extraction from subtitle filenames.
 *
 * Release names like `The.Office.S02E03.720p.WEB-DL.x264.srt` carry a lot of
 * noise that makes catalog searches miss. `normalize_title` strips the
 * year, the episode marker and well-known release tags, leaving
 * `The Office`.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// @const: Standalone release year
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:19|20)\d{2}\b").unwrap()
});

// @const: Season/episode markers with the separators in front of them
static EPISODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[. _-]*(?:S\d{1,2}E\d{1,2}|Season\s*\d+|Ep\d+|Episode\s*\d+)").unwrap()
});

// @const: Resolution, codec, source, language and group tags
static RELEASE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:1080p|720p|480p|2160p|x264|x265|WEB[-_. ]?DL|BluRay|HDR|HEVC|AAC|H264|H265|CHS|ENG|SUB|Dual|NF|AMZN|WEBRip)\b",
    )
    .unwrap()
});

// @const: Dot and underscore separators
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[._]+").unwrap()
});

/// Produce a catalog search title from a filename or path
pub fn normalize_title(filename: &str) -> String {
    let stem = file_stem(filename);
    let title = YEAR_REGEX.replace_all(&stem, "");
    let title = EPISODE_REGEX.replace_all(&title, "");
    let title = RELEASE_TAG_REGEX.replace_all(&title, "");
    let title = SEPARATOR_REGEX.replace_all(&title, " ");
    title.trim().to_string()
}

// Both separators are handled so Windows-style names work on any platform
fn file_stem(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    Path::new(base)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
