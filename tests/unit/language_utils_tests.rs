/*!
 * Tests for the translation language menu
 */

use summarist::errors::TranslationError;
use summarist::language_utils::{validate_menu, TargetLanguage};

/// Test that every menu entry maps to its ISO 639-1 code
#[test]
fn test_code_withEveryMenuEntry_shouldMatchTable() {
    let codes: Vec<(&str, &str)> = TargetLanguage::all()
        .iter()
        .map(|language| (language.menu_name(), language.code()))
        .collect();

    assert_eq!(codes, vec![
        ("Hindi", "hi"),
        ("French", "fr"),
        ("Gujarati", "gu"),
        ("Japanese", "ja"),
    ]);
}

/// Test that menu names parse regardless of case
#[test]
fn test_from_menu_name_withMixedCase_shouldParse() {
    assert_eq!(TargetLanguage::from_menu_name("french").unwrap(), TargetLanguage::French);
    assert_eq!(TargetLanguage::from_menu_name("  GUJARATI ").unwrap(), TargetLanguage::Gujarati);
    assert_eq!("ja".parse::<TargetLanguage>().unwrap(), TargetLanguage::Japanese);
}

/// Test that names outside the menu are rejected
#[test]
fn test_from_menu_name_withUnknownLanguage_shouldFail() {
    let result = TargetLanguage::from_menu_name("Spanish");
    assert!(matches!(result, Err(TranslationError::UnsupportedLanguage(name)) if name == "Spanish"));
}

/// Test that the table agrees with ISO 639
#[test]
fn test_validate_menu_withStaticTable_shouldPass() {
    assert!(validate_menu().is_ok());
}

/// Test that display uses the menu name
#[test]
fn test_display_withLanguage_shouldShowMenuName() {
    assert_eq!(TargetLanguage::Japanese.to_string(), "Japanese");
}
