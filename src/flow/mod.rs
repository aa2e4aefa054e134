//! The flow graph model: typed nodes with per-kind output ports, edges
//! bound to those ports, and the flow object itself.

mod graph;
mod node;

pub use graph::{Flow, FlowEdge, Trigger, TriggerKind};
pub use node::{CacheOperation, ExecutionMode, FlowNode, NodeConfig, NodeKind, Position};
