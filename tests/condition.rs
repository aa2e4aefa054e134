//! Tests for the condition rule model and its compilation into expression
//! strings.
mod common;
use bunki::condition::{BOOLEAN_OPERATORS, NUMBER_OPERATORS, STRING_OPERATORS};
use bunki::prelude::*;
use common::*;

#[test]
fn test_single_complete_rule_compiles_without_parentheses() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    fill_last_rule(&mut set, "#environment", "is", "production", &tags, &vars);

    assert_eq!(compile(&set).as_deref(), Some("#environment is production"));
}

#[test]
fn test_multiple_rules_compile_into_one_flat_group() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    fill_last_rule(&mut set, "#debug", "is", "false", &tags, &vars);
    set.add_rule();
    fill_last_rule(&mut set, "$MAX_RETRIES", ">", "1", &tags, &vars);
    set.set_logic_operator(LogicOperator::Or);

    assert_eq!(
        compile(&set).as_deref(),
        Some("(#debug is false OR $MAX_RETRIES > 1)")
    );
}

#[test]
fn test_incomplete_rules_are_silently_dropped() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    fill_last_rule(&mut set, "#environment", "is", "production", &tags, &vars);

    // Second rule has a field but no operator.
    let rule_id = set.add_rule().id.clone();
    set.set_field(&rule_id, "#version", &tags, &vars);

    // Only the complete rule survives, so no parentheses.
    assert_eq!(compile(&set).as_deref(), Some("#environment is production"));
}

#[test]
fn test_zero_complete_rules_yields_no_result() {
    let set = ConditionSet::new();
    assert_eq!(compile(&set), None);
}

#[test]
fn test_value_less_operator_leaves_no_trailing_space() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    let rule_id = set.rules()[0].id.clone();
    set.set_field(&rule_id, "#environment", &tags, &vars);
    set.set_operator(&rule_id, "is_empty");

    assert_eq!(compile(&set).as_deref(), Some("#environment is_empty"));
}

#[test]
fn test_set_field_derives_type_and_resets_operator_and_value() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    let rule_id = set.rules()[0].id.clone();

    set.set_field(&rule_id, "#environment", &tags, &vars);
    set.set_operator(&rule_id, "is");
    set.set_value(&rule_id, "production");

    // Re-pointing the field resets operator and value and re-derives type.
    set.set_field(&rule_id, "#debug", &tags, &vars);
    let rule = &set.rules()[0];
    assert_eq!(rule.field_type, Some(SymbolType::Boolean));
    assert!(rule.operator.is_empty());
    assert!(rule.value.is_empty());
}

#[test]
fn test_set_field_with_unknown_reference_has_no_type() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    let rule_id = set.rules()[0].id.clone();

    set.set_field(&rule_id, "#no_such_tag", &tags, &vars);
    assert_eq!(set.rules()[0].field_type, None);
}

#[test]
fn test_variable_reference_resolves_against_variable_registry() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    let rule_id = set.rules()[0].id.clone();

    set.set_field(&rule_id, "$MAX_RETRIES", &tags, &vars);
    assert_eq!(set.rules()[0].field_type, Some(SymbolType::Number));
}

#[test]
fn test_emptiness_operator_forces_value_empty() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    let rule_id = set.rules()[0].id.clone();

    set.set_field(&rule_id, "#environment", &tags, &vars);
    set.set_operator(&rule_id, "is");
    set.set_value(&rule_id, "production");
    set.set_operator(&rule_id, "is_empty");
    assert!(set.rules()[0].value.is_empty());

    // While the operator takes no value, assignments are ignored.
    set.set_value(&rule_id, "production");
    assert!(set.rules()[0].value.is_empty());
}

#[test]
fn test_operator_tables_per_type() {
    assert_eq!(
        operators_for(SymbolType::String),
        STRING_OPERATORS,
    );
    assert_eq!(
        operators_for(SymbolType::Number),
        NUMBER_OPERATORS,
    );
    assert_eq!(operators_for(SymbolType::Boolean), BOOLEAN_OPERATORS);
    assert_eq!(BOOLEAN_OPERATORS, &["is"]);

    assert!(operator_takes_value("is"));
    assert!(operator_takes_value(">"));
    assert!(!operator_takes_value("is_empty"));
    assert!(!operator_takes_value("is_not_empty"));
    assert!(!operator_takes_value("empty"));
    assert!(!operator_takes_value("not_empty"));
}

#[test]
fn test_criteria_pattern_resyncs_on_rule_count_and_logic_changes() {
    let mut set = ConditionSet::new();
    assert_eq!(set.criteria_pattern(), "(1)");

    set.add_rule();
    assert_eq!(set.criteria_pattern(), "(1) AND (2)");

    set.set_logic_operator(LogicOperator::Or);
    assert_eq!(set.criteria_pattern(), "(1) OR (2)");

    set.add_rule();
    assert_eq!(set.criteria_pattern(), "(1) OR (2) OR (3)");
}

#[test]
fn test_manual_pattern_edit_preserved_until_next_resync() {
    let mut set = ConditionSet::new();
    set.add_rule();

    set.set_criteria_pattern("((1) AND (2)) OR (1)");
    assert!(set.pattern_edited());
    assert_eq!(set.criteria_pattern(), "((1) AND (2)) OR (1)");

    // The next rule-count change overwrites the manual edit.
    set.add_rule();
    assert!(!set.pattern_edited());
    assert_eq!(set.criteria_pattern(), "(1) AND (2) AND (3)");
}

#[test]
fn test_manual_pattern_does_not_affect_compilation() {
    let tags = tag_registry();
    let vars = variable_registry();
    let mut set = ConditionSet::new();
    fill_last_rule(&mut set, "#debug", "is", "false", &tags, &vars);
    set.add_rule();
    fill_last_rule(&mut set, "#environment", "is", "production", &tags, &vars);

    set.set_criteria_pattern("(2) AND (1)");
    assert_eq!(
        compile(&set).as_deref(),
        Some("(#debug is false AND #environment is production)")
    );
}

#[test]
fn test_last_rule_cannot_be_removed() {
    let mut set = ConditionSet::new();
    let only_id = set.rules()[0].id.clone();
    assert!(!set.remove_rule(&only_id));
    assert_eq!(set.rules().len(), 1);

    let second_id = set.add_rule().id.clone();
    assert!(set.remove_rule(&second_id));
    assert_eq!(set.rules().len(), 1);
    assert_eq!(set.criteria_pattern(), "(1)");
}
