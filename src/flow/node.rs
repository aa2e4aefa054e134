use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The block kinds a flow can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Script,
    Branch,
    Loop,
    Query,
    Cache,
    Switch,
}

impl NodeKind {
    /// Parses the kind string a drag/drop event carries.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "script" => Some(NodeKind::Script),
            "branch" => Some(NodeKind::Branch),
            "loop" => Some(NodeKind::Loop),
            "query" => Some(NodeKind::Query),
            "cache" => Some(NodeKind::Cache),
            "switch" => Some(NodeKind::Switch),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Script => "script",
            NodeKind::Branch => "branch",
            NodeKind::Loop => "loop",
            NodeKind::Query => "query",
            NodeKind::Cache => "cache",
            NodeKind::Switch => "switch",
        }
    }

    /// The fixed named output ports for this kind. An empty slice means a
    /// single unnamed port, so edges leaving such a node carry no port name.
    pub fn output_ports(self) -> &'static [&'static str] {
        match self {
            NodeKind::Branch => &["true", "false"],
            NodeKind::Loop => &["loop", "exit"],
            NodeKind::Switch => &["case1", "case2", "case3", "default"],
            NodeKind::Script | NodeKind::Query | NodeKind::Cache => &[],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a loop's condition gates entry or exit. Descriptive metadata
/// consumed by an external execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionMode {
    CheckThenExecute,
    ExecuteThenCheck,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::CheckThenExecute
    }
}

/// The operation a cache node performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheOperation {
    Get,
    Set,
    Del,
    Exists,
}

impl Default for CacheOperation {
    fn default() -> Self {
        CacheOperation::Get
    }
}

/// Kind-specific node configuration, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeConfig {
    #[serde(rename_all = "camelCase")]
    Script {
        #[serde(default)]
        function_name: String,
        #[serde(default)]
        arguments: AHashMap<String, String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_variable: Option<String>,
    },
    Branch {
        #[serde(default)]
        condition: String,
    },
    #[serde(rename_all = "camelCase")]
    Loop {
        #[serde(default)]
        condition: String,
        #[serde(default)]
        execution_mode: ExecutionMode,
    },
    Query {
        #[serde(default)]
        query: String,
    },
    #[serde(rename_all = "camelCase")]
    Cache {
        #[serde(default)]
        operation: CacheOperation,
        #[serde(default)]
        key: String,
        /// Only meaningful for `set`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        /// Only meaningful for `get` and `exists`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result_mapping: Option<String>,
    },
    Switch {
        #[serde(default)]
        variable: String,
    },
}

impl NodeConfig {
    /// The empty configuration a freshly dropped node of this kind starts
    /// with.
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Script => NodeConfig::Script {
                function_name: String::new(),
                arguments: AHashMap::new(),
                return_variable: None,
            },
            NodeKind::Branch => NodeConfig::Branch {
                condition: String::new(),
            },
            NodeKind::Loop => NodeConfig::Loop {
                condition: String::new(),
                execution_mode: ExecutionMode::default(),
            },
            NodeKind::Query => NodeConfig::Query {
                query: String::new(),
            },
            NodeKind::Cache => NodeConfig::Cache {
                operation: CacheOperation::default(),
                key: String::new(),
                value: None,
                result_mapping: None,
            },
            NodeKind::Switch => NodeConfig::Switch {
                variable: String::new(),
            },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::Script { .. } => NodeKind::Script,
            NodeConfig::Branch { .. } => NodeKind::Branch,
            NodeConfig::Loop { .. } => NodeKind::Loop,
            NodeConfig::Query { .. } => NodeKind::Query,
            NodeConfig::Cache { .. } => NodeKind::Cache,
            NodeConfig::Switch { .. } => NodeKind::Switch,
        }
    }
}

/// A canvas coordinate supplied by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One block in a flow. The kind lives in the config variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub position: Position,
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl FlowNode {
    /// Creates a node with empty config for a dropped kind string, the
    /// contract the rendering surface relies on.
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self {
            id: format!("{}-{}", kind.as_str(), Uuid::new_v4()),
            position,
            config: NodeConfig::empty(kind),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.config.kind()
    }

    /// The node's named output ports; empty for single-unnamed-port kinds.
    pub fn output_ports(&self) -> &'static [&'static str] {
        self.kind().output_ports()
    }
}
