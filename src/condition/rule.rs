use crate::registry::{SymbolRegistry, SymbolType};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The single boolean operator joining every rule pair in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicOperator {
    And,
    Or,
}

impl fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicOperator::And => write!(f, "AND"),
            LogicOperator::Or => write!(f, "OR"),
        }
    }
}

/// Operator vocabulary for string-typed fields.
pub const STRING_OPERATORS: &[&str] = &[
    "is",
    "isnt",
    "contains",
    "doesnt_contain",
    "starts_with",
    "ends_with",
    "is_empty",
    "is_not_empty",
];

/// Operator vocabulary for number-typed fields.
pub const NUMBER_OPERATORS: &[&str] = &[
    ">",
    "<",
    "=",
    "!=",
    ">=",
    "<=",
    "between",
    "not_between",
    "empty",
    "not_empty",
];

/// Operator vocabulary for boolean-typed fields. The value is constrained
/// to [`BOOLEAN_VALUES`].
pub const BOOLEAN_OPERATORS: &[&str] = &["is"];

/// The only values a boolean comparison accepts.
pub const BOOLEAN_VALUES: &[&str] = &["true", "false"];

/// The operators a field of the given type can be compared with.
pub fn operators_for(field_type: SymbolType) -> &'static [&'static str] {
    match field_type {
        SymbolType::String => STRING_OPERATORS,
        SymbolType::Number => NUMBER_OPERATORS,
        SymbolType::Boolean => BOOLEAN_OPERATORS,
    }
}

/// Whether an operator compares against a value. Emptiness checks do not;
/// their value input is forced empty.
pub fn operator_takes_value(operator: &str) -> bool {
    !matches!(operator, "is_empty" | "is_not_empty" | "empty" | "not_empty")
}

/// One structured comparison: a field reference, its registry-derived type,
/// an operator from that type's table, and a literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub id: String,
    pub field: String,
    #[serde(rename = "fieldType")]
    pub field_type: Option<SymbolType>,
    pub operator: String,
    pub value: String,
}

impl ConditionRule {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            field: String::new(),
            field_type: None,
            operator: String::new(),
            value: String::new(),
        }
    }

    /// A rule takes part in compilation only when both field and operator
    /// are set.
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.operator.is_empty()
    }
}

impl Default for ConditionRule {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered list of rules joined by one logic operator, plus the advisory
/// criteria pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet {
    rules: Vec<ConditionRule>,
    #[serde(rename = "logicOperator")]
    logic_operator: LogicOperator,
    #[serde(rename = "criteriaPattern")]
    criteria_pattern: String,
    #[serde(skip)]
    pattern_edited: bool,
}

impl ConditionSet {
    /// Starts with a single empty rule, the way a fresh condition form opens.
    pub fn new() -> Self {
        Self {
            rules: vec![ConditionRule::new()],
            logic_operator: LogicOperator::And,
            criteria_pattern: "(1)".to_string(),
            pattern_edited: false,
        }
    }

    pub fn rules(&self) -> &[ConditionRule] {
        &self.rules
    }

    pub fn logic_operator(&self) -> LogicOperator {
        self.logic_operator
    }

    pub fn criteria_pattern(&self) -> &str {
        &self.criteria_pattern
    }

    pub fn add_rule(&mut self) -> &ConditionRule {
        self.rules.push(ConditionRule::new());
        self.resync_pattern();
        self.rules.last().unwrap()
    }

    /// Removes a rule by id. The last remaining rule cannot be removed.
    pub fn remove_rule(&mut self, id: &str) -> bool {
        if self.rules.len() <= 1 {
            return false;
        }
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        let removed = self.rules.len() != before;
        if removed {
            self.resync_pattern();
        }
        removed
    }

    pub fn set_logic_operator(&mut self, op: LogicOperator) {
        self.logic_operator = op;
        self.resync_pattern();
    }

    /// Points a rule at a new field reference. The field type is re-derived
    /// by registry lookup and the operator and value are reset.
    pub fn set_field(
        &mut self,
        rule_id: &str,
        field: &str,
        tags: &SymbolRegistry,
        variables: &SymbolRegistry,
    ) -> bool {
        let Some(rule) = self.rules.iter_mut().find(|r| r.id == rule_id) else {
            return false;
        };
        rule.field = field.to_string();
        rule.field_type = tags
            .resolve(field)
            .or_else(|| variables.resolve(field))
            .map(|s| s.symbol_type);
        rule.operator.clear();
        rule.value.clear();
        true
    }

    /// Sets a rule's operator. Choosing an emptiness operator forces the
    /// value empty.
    pub fn set_operator(&mut self, rule_id: &str, operator: &str) -> bool {
        let Some(rule) = self.rules.iter_mut().find(|r| r.id == rule_id) else {
            return false;
        };
        rule.operator = operator.to_string();
        if !operator_takes_value(operator) {
            rule.value.clear();
        }
        true
    }

    /// Sets a rule's comparison value. Ignored while the operator takes no
    /// value.
    pub fn set_value(&mut self, rule_id: &str, value: &str) -> bool {
        let Some(rule) = self.rules.iter_mut().find(|r| r.id == rule_id) else {
            return false;
        };
        if operator_takes_value(&rule.operator) {
            rule.value = value.to_string();
        }
        true
    }

    /// Records a manual pattern edit. It is preserved until the next
    /// rule-count or logic-operator change.
    pub fn set_criteria_pattern(&mut self, pattern: &str) {
        self.criteria_pattern = pattern.to_string();
        self.pattern_edited = true;
    }

    pub fn pattern_edited(&self) -> bool {
        self.pattern_edited
    }

    fn resync_pattern(&mut self) {
        self.criteria_pattern = if self.rules.len() == 1 {
            "(1)".to_string()
        } else {
            (1..=self.rules.len())
                .map(|n| format!("({})", n))
                .join(&format!(" {} ", self.logic_operator))
        };
        self.pattern_edited = false;
    }
}

impl Default for ConditionSet {
    fn default() -> Self {
        Self::new()
    }
}
