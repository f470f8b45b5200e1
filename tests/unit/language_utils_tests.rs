/*!
 * Tests for ISO language code utilities
 */

use dualsub::language_utils::{get_language_name, language_codes_match, normalize_to_part2t};

#[test]
fn test_normalizeToPart2t_withTwoLetterCode_shouldReturnThreeLetterCode() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t(" ZH ").unwrap(), "zho");
}

#[test]
fn test_normalizeToPart2t_withBibliographicCode_shouldReturnTerminologyCode() {
    assert_eq!(normalize_to_part2t("chi").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
}

#[test]
fn test_normalizeToPart2t_withInvalidCode_shouldFail() {
    assert!(normalize_to_part2t("xx").is_err());
    assert!(normalize_to_part2t("english").is_err());
    assert!(normalize_to_part2t("").is_err());
}

#[test]
fn test_languageCodesMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("zh", "chi"));
    assert!(language_codes_match("en", "eng"));
    assert!(!language_codes_match("en", "zh"));
    assert!(!language_codes_match("en", "invalid"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("zh").unwrap(), "Chinese");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert_eq!(get_language_name("fr").unwrap(), "French");
}
