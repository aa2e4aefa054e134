use super::node::{FlowNode, NodeConfig, NodeKind, Position};
use crate::error::GraphError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What starts a flow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Datasource,
    Schedule,
    Webhook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub kind: TriggerKind,
    #[serde(default)]
    pub config: serde_json::Value,
}

impl Trigger {
    pub fn new(kind: TriggerKind) -> Self {
        Self {
            kind,
            config: serde_json::Value::Null,
        }
    }
}

/// A connection from a source node's output port to a target node's input.
/// `source_port` is `None` for kinds with a single unnamed port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    #[serde(rename = "sourcePort", default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    pub target: String,
}

/// A complete automation flow: trigger, node/edge graph, and lifecycle
/// timestamps. Dates serialize as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub trigger: Trigger,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flow {
    pub fn new(name: &str, description: &str, trigger: Trigger) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            trigger,
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Adds a node, enforcing id uniqueness within the flow.
    pub fn add_node(&mut self, node: FlowNode) -> Result<&FlowNode, GraphError> {
        if self.node(&node.id).is_some() {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.nodes.push(node);
        Ok(self.nodes.last().unwrap())
    }

    /// Creates a node with empty config at a drop position and adds it.
    /// Generated ids are unique, so this cannot collide.
    pub fn drop_node(&mut self, kind: NodeKind, position: Position) -> &FlowNode {
        let node = FlowNode::new(kind, position);
        self.nodes.push(node);
        self.nodes.last().unwrap()
    }

    /// Removes a node by id. Edges touching it are left in place; dangling
    /// edges are a persisted-but-invalid state reported by `validate`, not
    /// auto-repaired.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        self.nodes.len() != before
    }

    /// Replaces a node's configuration (the double-click-to-configure
    /// contract).
    pub fn set_node_config(&mut self, id: &str, config: NodeConfig) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        node.config = config;
        Ok(())
    }

    /// Connects a source port to a target node. The source node must exist
    /// and the port must belong to its kind's fixed port set (`None` for
    /// single-unnamed-port kinds).
    pub fn add_edge(
        &mut self,
        source: &str,
        source_port: Option<&str>,
        target: &str,
    ) -> Result<&FlowEdge, GraphError> {
        let source_node = self
            .node(source)
            .ok_or_else(|| GraphError::NodeNotFound(source.to_string()))?;

        let ports = source_node.output_ports();
        let valid = match source_port {
            None => ports.is_empty(),
            Some(p) => ports.contains(&p),
        };
        if !valid {
            return Err(GraphError::InvalidPort {
                node_id: source.to_string(),
                kind: source_node.kind().to_string(),
                port: source_port.unwrap_or("").to_string(),
            });
        }

        self.edges.push(FlowEdge {
            id: Uuid::new_v4().to_string(),
            source: source.to_string(),
            source_port: source_port.map(str::to_string),
            target: target.to_string(),
        });
        Ok(self.edges.last().unwrap())
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    /// Reports graph invariant violations without repairing anything:
    /// one `NodeNotFound` per missing edge endpoint.
    pub fn validate(&self) -> Vec<GraphError> {
        let mut issues = Vec::new();
        for edge in &self.edges {
            if self.node(&edge.source).is_none() {
                issues.push(GraphError::NodeNotFound(edge.source.clone()));
            }
            if self.node(&edge.target).is_none() {
                issues.push(GraphError::NodeNotFound(edge.target.clone()));
            }
        }
        issues
    }

    /// Serializes the full flow plus an `exportedAt` timestamp into a
    /// standalone JSON document. One-way dump, never re-imported.
    pub fn export(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut doc = serde_json::to_value(self)?;
        if let serde_json::Value::Object(map) = &mut doc {
            map.insert(
                "exportedAt".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339()),
            );
        }
        Ok(doc)
    }
}
