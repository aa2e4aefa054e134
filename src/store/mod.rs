//! Persistence: the key/value storage contract, its memory and file
//! backends, and the flow store with the draft/commit protocol.

mod backend;
mod flows;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use flows::{FlowStore, OpenedFlow, FLOWS_KEY};
