//! # Bunki - Flow Authoring Core
//!
//! **Bunki** is the data core of a visual editor for automation "flows":
//! directed graphs of typed blocks (branch, loop, script, query, cache,
//! switch) wired together by edges. It owns the parts of that editor that
//! are pure engineering: the structured condition-rule model and its
//! compilation into a boolean expression string, the tokenizer and
//! autocomplete engine that embed `#tag` / `$variable` references inside
//! free-form text, the typed flow graph with per-kind output ports, and the
//! draft/commit persistence protocol. Rendering, drag-and-drop and form
//! widgets are external collaborators; this crate is data only.
//!
//! ## Core Workflow
//!
//! 1. **Load the registries**: the fixed tag catalog plus the user-mutable
//!    variable and function registries, initialized from a [`store::Storage`]
//!    backend.
//! 2. **Build a condition**: assemble [`condition::ConditionRule`]s against
//!    the registries and compile them with [`condition::compile`].
//! 3. **Wire the graph**: store the compiled string in a node's
//!    configuration and connect nodes through their kind's fixed output
//!    ports.
//! 4. **Persist**: save drafts while editing; a formal save commits the flow
//!    and clears its draft.
//!
//! ## Quick Start
//!
//! ```rust
//! use bunki::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let storage = Arc::new(MemoryStorage::new());
//!     let tags = SymbolRegistry::tag_catalog();
//!     let variables = SymbolRegistry::variables(storage.clone());
//!
//!     // Build a condition from structured rules.
//!     let mut set = ConditionSet::new();
//!     let rule_id = set.rules()[0].id.clone();
//!     set.set_field(&rule_id, "#environment", &tags, &variables);
//!     set.set_operator(&rule_id, "is");
//!     set.set_value(&rule_id, "production");
//!     let condition = compile(&set).expect("one complete rule");
//!     assert_eq!(condition, "#environment is production");
//!
//!     // Store it in a branch node and commit the flow.
//!     let mut flow = Flow::new(
//!         "Deploy gate",
//!         "Blocks risky deploys",
//!         Trigger::new(TriggerKind::Webhook),
//!     );
//!     let node_id = flow
//!         .drop_node(NodeKind::Branch, Position { x: 100.0, y: 80.0 })
//!         .id
//!         .clone();
//!     flow.set_node_config(&node_id, NodeConfig::Branch { condition: condition.clone() })?;
//!
//!     let store = FlowStore::new(storage);
//!     store.save_flow(flow)?;
//!
//!     // Re-opening the condition for editing turns references into chips.
//!     let tokenized = derive_chips(&condition, &tags, &variables);
//!     assert_eq!(tokenized.chips().len(), 1);
//!     assert_eq!(tokenized.reconstruct(), condition);
//!
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod error;
pub mod flow;
pub mod prelude;
pub mod registry;
pub mod store;
