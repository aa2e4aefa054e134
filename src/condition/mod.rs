//! The condition expression subsystem: the structured rule model built via
//! forms, its compilation into a textual boolean expression, and the
//! tokenizer/autocomplete engine that embeds `#tag` and `$variable`
//! references inside free-form text.

mod autocomplete;
mod compiler;
mod rule;
mod tokenizer;

pub use autocomplete::{Autocomplete, Selection, Suggestion};
pub use compiler::compile;
pub use rule::{
    operator_takes_value, operators_for, ConditionRule, ConditionSet, LogicOperator,
    BOOLEAN_OPERATORS, BOOLEAN_VALUES, NUMBER_OPERATORS, STRING_OPERATORS,
};
pub use tokenizer::{derive_chips, ChipKind, ConditionChip, Segment, TokenizedCondition};
