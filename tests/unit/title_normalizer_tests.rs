/*!
 * Tests for search title extraction from file names
 */

use dualsub::title_normalizer::normalize_title;

#[test]
fn test_normalizeTitle_withCleanTitles_shouldBeUnchanged() {
    for title in ["Inception", "The Office", "Arrival", "Spirited Away", "Twelve Monkeys"] {
        assert_eq!(normalize_title(&format!("{}.srt", title)), title);
        assert_eq!(normalize_title(&format!("  {}  ", title)), title);
    }
}

#[test]
fn test_normalizeTitle_withWindowsPath_shouldUseFileNameOnly() {
    assert_eq!(normalize_title(r"C:\Subs\2023\Oppenheimer.2023.2160p.HDR.HEVC.srt"), "Oppenheimer");
}

#[test]
fn test_normalizeTitle_withWebDlVariants_shouldRemoveAll() {
    for tag in ["WEB-DL", "WEB_DL", "WEBDL", "web.dl"] {
        assert_eq!(normalize_title(&format!("Severance.S01E01.{}.srt", tag)), "Severance");
    }
}

#[test]
fn test_normalizeTitle_withGroupAndLanguageTags_shouldRemoveThem() {
    assert_eq!(normalize_title("Dark.S01E01.NF.AMZN.CHS.ENG.Dual.AAC.H265.srt"), "Dark");
}
