//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the bunki crate. Import
//! this module to get access to the core functionality without having to
//! import each type individually.

// Condition subsystem
pub use crate::condition::{
    compile, derive_chips, operator_takes_value, operators_for, Autocomplete, ChipKind,
    ConditionChip, ConditionRule, ConditionSet, LogicOperator, Segment, Selection, Suggestion,
    TokenizedCondition,
};

// Symbol and function registries
pub use crate::registry::{
    FunctionArg, FunctionDef, FunctionInput, FunctionRegistry, Namespace, Symbol, SymbolPatch,
    SymbolRegistry, SymbolType,
};

// Flow graph model
pub use crate::flow::{
    CacheOperation, ExecutionMode, Flow, FlowEdge, FlowNode, NodeConfig, NodeKind, Position,
    Trigger, TriggerKind,
};

// Persistence
pub use crate::store::{FileStorage, FlowStore, MemoryStorage, OpenedFlow, Storage};

// Error types
pub use crate::error::{GraphError, RegistryError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
