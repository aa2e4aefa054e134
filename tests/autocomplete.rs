//! Tests for the suggestion engine: trigger detection, partial-name
//! filtering, selection splicing and dismissal.
mod common;
use bunki::prelude::*;
use common::*;

#[test]
fn test_trigger_char_opens_full_namespace_unfiltered() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("#", 1, &tags, &vars);
    assert!(ac.is_open());
    assert_eq!(ac.trigger(), Some(ChipKind::Tag));
    assert_eq!(ac.suggestions().len(), tags.list().len());

    ac.update("$", 1, &tags, &vars);
    assert!(ac.is_open());
    assert_eq!(ac.trigger(), Some(ChipKind::Variable));
    assert_eq!(ac.suggestions().len(), vars.list().len());
}

#[test]
fn test_partial_token_filters_case_insensitively() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("#env", 4, &tags, &vars);
    assert!(ac.is_open());
    let names: Vec<&str> = ac.suggestions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["environment"]);

    ac.update("#ENV", 4, &tags, &vars);
    let names: Vec<&str> = ac.suggestions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["environment"]);
}

#[test]
fn test_substring_match_is_not_prefix_only() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    // "time" matches both timestamp and timeout_seconds; "out" matches
    // timeout_seconds by substring.
    ac.update("#out", 4, &tags, &vars);
    let names: Vec<&str> = ac.suggestions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["timeout_seconds"]);
}

#[test]
fn test_panel_closes_when_no_match_remains() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("#env", 4, &tags, &vars);
    assert!(ac.is_open());

    ac.update("#envzz", 6, &tags, &vars);
    assert!(!ac.is_open());
    assert!(ac.suggestions().is_empty());
}

#[test]
fn test_space_ends_the_in_progress_token() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("#environment is", 15, &tags, &vars);
    assert!(!ac.is_open());
}

#[test]
fn test_plain_text_keeps_panel_closed() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("production", 10, &tags, &vars);
    assert!(!ac.is_open());
    assert_eq!(ac.trigger(), None);
}

#[test]
fn test_selection_splices_reference_and_repositions_cursor() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("#env", 4, &tags, &vars);
    let selection = ac.select("#env", "environment").expect("open panel");

    assert_eq!(selection.text, "#environment");
    assert_eq!(selection.cursor, "#environment".len());
    assert_eq!(selection.chip.kind, ChipKind::Tag);
    assert_eq!(selection.chip.original_name, "environment");
    assert!(!ac.is_open());
}

#[test]
fn test_selection_in_the_middle_of_text_preserves_the_tail() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    let text = "x #env y";
    ac.update(text, 6, &tags, &vars);
    assert!(ac.is_open());

    let selection = ac.select(text, "environment").expect("open panel");
    assert_eq!(selection.text, "x #environment y");
    assert_eq!(selection.cursor, "x #environment".len());
}

#[test]
fn test_variable_selection_uses_dollar_sigil() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("$MAX", 4, &tags, &vars);
    let selection = ac.select("$MAX", "MAX_RETRIES").expect("open panel");
    assert_eq!(selection.text, "$MAX_RETRIES");
    assert_eq!(selection.chip.text, "$MAX_RETRIES");
    assert_eq!(selection.chip.kind, ChipKind::Variable);
}

#[test]
fn test_escape_closes_without_altering_state() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("#env", 4, &tags, &vars);
    assert!(ac.is_open());

    ac.close();
    assert!(!ac.is_open());
    assert!(ac.suggestions().is_empty());
    assert_eq!(ac.trigger(), None);

    // Selecting after dismissal does nothing.
    assert!(ac.select("#env", "environment").is_none());
}

#[test]
fn test_cursor_off_a_char_boundary_never_panics() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut ac = Autocomplete::new();

    // Byte 2 falls inside the two-byte 'é'; the panel just stays closed.
    ac.update("#é", 2, &tags, &vars);
    assert!(!ac.is_open());

    // A stale cursor past the end of a shorter string cannot select.
    ac.update("#env", 4, &tags, &vars);
    assert!(ac.is_open());
    assert!(ac.select("#e", "environment").is_none());
}

#[test]
fn test_registry_changes_are_visible_on_next_keystroke() {
    let tags = tag_registry();
    let mut vars = variable_registry();
    let mut ac = Autocomplete::new();

    ac.update("$CACHE", 6, &tags, &vars);
    assert!(!ac.is_open());

    vars.add("CACHE_TTL", "60", SymbolType::Number).unwrap();
    ac.update("$CACHE", 6, &tags, &vars);
    assert!(ac.is_open());
    assert_eq!(ac.suggestions()[0].name, "CACHE_TTL");
}
