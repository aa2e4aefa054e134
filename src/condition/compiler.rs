use super::rule::{ConditionRule, ConditionSet};
use itertools::Itertools;

/// Compiles a rule set into a single boolean expression string.
///
/// Incomplete rules are dropped without error. With no complete rule the
/// result is `None` and the caller must refuse the save. One rule compiles
/// bare; two or more compile into one flat parenthesized group joined by the
/// set's logic operator. The criteria pattern is advisory UI state and is
/// never consulted here.
pub fn compile(set: &ConditionSet) -> Option<String> {
    let complete: Vec<&ConditionRule> = set.rules().iter().filter(|r| r.is_complete()).collect();

    match complete.as_slice() {
        [] => None,
        [rule] => Some(render_rule(rule)),
        rules => {
            let joined = rules
                .iter()
                .map(|r| render_rule(r))
                .join(&format!(" {} ", set.logic_operator()));
            Some(format!("({})", joined))
        }
    }
}

/// Renders one rule as `field operator value`, trimmed so value-less
/// operators leave no trailing space.
fn render_rule(rule: &ConditionRule) -> String {
    format!("{} {} {}", rule.field, rule.operator, rule.value)
        .trim_end()
        .to_string()
}
