use super::*;

#[test]
fn validate_prompts_trims_both_fields() {
    assert_eq!(
        validate_prompts("  a story ", "\ta hero\n"),
        Some(("a story".to_owned(), "a hero".to_owned()))
    );
}

#[test]
fn validate_prompts_requires_both_fields() {
    assert_eq!(validate_prompts("", "hero"), None);
    assert_eq!(validate_prompts("story", "   "), None);
}

#[test]
fn defaults_are_valid_prompts() {
    assert!(validate_prompts(DEFAULT_STORY_PROMPT, DEFAULT_CHARACTER_PROMPT).is_some());
}

#[test]
fn submit_label_reflects_loading() {
    assert_eq!(submit_label(false), "Create Comic");
    assert_eq!(submit_label(true), "Generating Your Masterpiece...");
}
