//! Common test utilities for building registries, condition sets and flows.
use bunki::prelude::*;

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The fixed tag catalog used across tests.
#[allow(dead_code)]
pub fn tag_registry() -> SymbolRegistry {
    SymbolRegistry::tag_catalog()
}

/// An unpersisted variable registry seeded with the default set
/// (API_URL, MAX_RETRIES, TIMEOUT).
#[allow(dead_code)]
pub fn variable_registry() -> SymbolRegistry {
    SymbolRegistry::variables_in_memory()
}

/// Fills the set's last rule with a field, operator and value.
#[allow(dead_code)]
pub fn fill_last_rule(
    set: &mut ConditionSet,
    field: &str,
    operator: &str,
    value: &str,
    tags: &SymbolRegistry,
    variables: &SymbolRegistry,
) {
    let rule_id = set.rules().last().expect("set has a rule").id.clone();
    set.set_field(&rule_id, field, tags, variables);
    set.set_operator(&rule_id, operator);
    set.set_value(&rule_id, value);
}

/// A flow with one node of every kind that exposes named ports, plus a
/// script node for the unnamed-port case.
#[allow(dead_code)]
pub fn sample_flow() -> Flow {
    let mut flow = Flow::new(
        "Order routing",
        "Routes incoming orders",
        Trigger::new(TriggerKind::Datasource),
    );
    for kind in [
        NodeKind::Branch,
        NodeKind::Loop,
        NodeKind::Switch,
        NodeKind::Script,
    ] {
        flow.drop_node(kind, Position { x: 0.0, y: 0.0 });
    }
    flow
}

/// Id of the first node of a kind in the flow.
#[allow(dead_code)]
pub fn node_id_of(flow: &Flow, kind: NodeKind) -> String {
    flow.nodes
        .iter()
        .find(|n| n.kind() == kind)
        .expect("node of kind present")
        .id
        .clone()
}
