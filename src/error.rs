use thiserror::Error;

/// Errors that can occur while reading or writing the persistent store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not access storage key '{key}': {message}")]
    Io { key: String, message: String },

    #[error("Failed to serialize value for storage key '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when mutating a symbol or function registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("A symbol named '{0}' already exists in this namespace")]
    DuplicateName(String),

    #[error("No registry entry with id '{0}'")]
    NotFound(String),

    #[error("Required field '{0}' is empty")]
    MissingField(&'static str),

    #[error("The tag catalog is read-only")]
    ReadOnly,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur when editing the flow graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("A node with id '{0}' already exists in this flow")]
    DuplicateNodeId(String),

    #[error("Edge references unknown node '{0}'")]
    NodeNotFound(String),

    #[error("Node '{node_id}' ({kind}) has no output port named '{port}'")]
    InvalidPort {
        node_id: String,
        kind: String,
        port: String,
    },
}
