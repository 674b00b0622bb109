/*!
 * Tests for target language validation
 */

use subgen::language_utils::TargetLanguage;

/// Test parsing language names
#[test]
fn test_parse_withLanguageNames_shouldAcceptSupportedSet() {
    assert_eq!(TargetLanguage::parse("english").unwrap(), TargetLanguage::English);
    assert_eq!(TargetLanguage::parse("English").unwrap(), TargetLanguage::English);
    assert_eq!(TargetLanguage::parse(" vietnamese ").unwrap(), TargetLanguage::Vietnamese);
}

/// Test parsing ISO codes
#[test]
fn test_parse_withIsoCodes_shouldResolveThroughIsolang() {
    assert_eq!(TargetLanguage::parse("en").unwrap(), TargetLanguage::English);
    assert_eq!(TargetLanguage::parse("eng").unwrap(), TargetLanguage::English);
    assert_eq!(TargetLanguage::parse("vi").unwrap(), TargetLanguage::Vietnamese);
    assert_eq!(TargetLanguage::parse("vie").unwrap(), TargetLanguage::Vietnamese);
}

/// Test rejection of languages outside the supported set
#[test]
fn test_parse_withUnsupportedLanguages_shouldFail() {
    assert!(TargetLanguage::parse("french").is_err());
    assert!(TargetLanguage::parse("fr").is_err());
    assert!(TargetLanguage::parse("fra").is_err());
    assert!(TargetLanguage::parse("").is_err());
    assert!(TargetLanguage::parse("xx").is_err());
}

/// Test display names used in prompts
#[test]
fn test_display_name_withSupportedLanguages_shouldCapitalize() {
    assert_eq!(TargetLanguage::English.display_name(), "English");
    assert_eq!(TargetLanguage::Vietnamese.display_name(), "Vietnamese");
    assert_eq!(TargetLanguage::English.code(), "en");
    assert_eq!(TargetLanguage::Vietnamese.code(), "vi");
    assert_eq!(TargetLanguage::supported().len(), 2);
}
