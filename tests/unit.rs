//! Unit tests for display implementations and error messages.
mod common;
use bunki::prelude::*;

#[test]
fn test_logic_operator_display() {
    assert_eq!(format!("{}", LogicOperator::And), "AND");
    assert_eq!(format!("{}", LogicOperator::Or), "OR");
}

#[test]
fn test_symbol_type_display() {
    assert_eq!(format!("{}", SymbolType::String), "String");
    assert_eq!(format!("{}", SymbolType::Number), "Number");
    assert_eq!(format!("{}", SymbolType::Boolean), "Boolean");
}

#[test]
fn test_node_kind_display() {
    assert_eq!(format!("{}", NodeKind::Branch), "branch");
    assert_eq!(format!("{}", NodeKind::Cache), "cache");
}

#[test]
fn test_chip_sigils() {
    assert_eq!(ChipKind::Tag.sigil(), '#');
    assert_eq!(ChipKind::Variable.sigil(), '$');
    assert_eq!(Namespace::Tag.sigil(), '#');
    assert_eq!(Namespace::Variable.sigil(), '$');
}

#[test]
fn test_chip_text_carries_the_sigil() {
    let chip = ConditionChip::new(ChipKind::Variable, "TIMEOUT");
    assert_eq!(chip.text, "$TIMEOUT");
    assert_eq!(chip.original_name, "TIMEOUT");
}

#[test]
fn test_error_display() {
    let err = GraphError::InvalidPort {
        node_id: "branch-1".to_string(),
        kind: "branch".to_string(),
        port: "maybe".to_string(),
    };
    assert!(err.to_string().contains("branch-1"));
    assert!(err.to_string().contains("maybe"));

    let dup = RegistryError::DuplicateName("MAX_RETRIES".to_string());
    assert!(dup.to_string().contains("MAX_RETRIES"));

    let missing = RegistryError::MissingField("code");
    assert!(missing.to_string().contains("code"));
}

#[test]
fn test_symbol_serde_uses_type_field() {
    let tags = SymbolRegistry::tag_catalog();
    let json = serde_json::to_value(tags.get("debug").unwrap()).unwrap();
    assert_eq!(json["type"], "Boolean");
    assert_eq!(json["name"], "debug");
}

#[test]
fn test_logic_operator_serde_is_uppercase() {
    assert_eq!(
        serde_json::to_value(LogicOperator::And).unwrap(),
        serde_json::json!("AND")
    );
    assert_eq!(
        serde_json::from_value::<LogicOperator>(serde_json::json!("OR")).unwrap(),
        LogicOperator::Or
    );
}
