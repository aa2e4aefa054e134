use super::backend::Storage;
use crate::error::StoreError;
use crate::flow::Flow;
use chrono::Utc;
use std::sync::Arc;

/// Storage key for the committed flow list.
pub const FLOWS_KEY: &str = "flows";

fn draft_key(flow_id: &str) -> String {
    format!("draft_{}", flow_id)
}

/// A flow as returned by `open_flow`, with the draft-precedence signal the
/// embedding surface uses to notify the user.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedFlow {
    pub flow: Flow,
    pub from_draft: bool,
}

/// Committed flows plus the draft protocol.
///
/// Drafts are shadow copies keyed by flow id, written on demand and deleted
/// the moment the flow is formally saved: commit always wins over and clears
/// drafts.
pub struct FlowStore {
    storage: Arc<dyn Storage>,
}

impl FlowStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The committed flow list. A malformed record is logged and treated as
    /// empty, never fatal.
    pub fn flows(&self) -> Result<Vec<Flow>, StoreError> {
        match self.storage.read(FLOWS_KEY)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(flows) => Ok(flows),
                Err(e) => {
                    log::warn!("malformed '{}' record, treating as empty: {}", FLOWS_KEY, e);
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    pub fn flow(&self, id: &str) -> Result<Option<Flow>, StoreError> {
        Ok(self.flows()?.into_iter().find(|f| f.id == id))
    }

    /// Commits a flow: refreshes `updated_at`, upserts it into the committed
    /// list, and unconditionally deletes any draft for its id.
    pub fn save_flow(&self, mut flow: Flow) -> Result<Flow, StoreError> {
        flow.updated_at = Utc::now();

        let mut flows = self.flows()?;
        match flows.iter_mut().find(|f| f.id == flow.id) {
            Some(existing) => *existing = flow.clone(),
            None => flows.push(flow.clone()),
        }
        self.write_json(FLOWS_KEY, &flows)?;

        self.delete_draft(&flow.id)?;
        Ok(flow)
    }

    /// Writes a draft copy of the flow's graph, independent of the committed
    /// object, marked with `isDraft: true`.
    pub fn save_draft(&self, flow: &Flow) -> Result<(), StoreError> {
        let key = draft_key(&flow.id);
        let mut doc = serde_json::to_value(flow).map_err(|e| StoreError::Serialize {
            key: key.clone(),
            source: e,
        })?;
        if let serde_json::Value::Object(map) = &mut doc {
            map.insert("isDraft".to_string(), serde_json::Value::Bool(true));
        }
        self.storage.write(&key, &doc.to_string())
    }

    /// The draft for a flow id, if one exists. A corrupt draft is logged and
    /// reported as absent.
    pub fn get_draft(&self, flow_id: &str) -> Result<Option<Flow>, StoreError> {
        let key = draft_key(flow_id);
        match self.storage.read(&key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(flow) => Ok(Some(flow)),
                Err(e) => {
                    log::warn!("malformed draft '{}', ignoring: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub fn delete_draft(&self, flow_id: &str) -> Result<(), StoreError> {
        self.storage.remove(&draft_key(flow_id))
    }

    /// Opens a flow for editing. A present draft takes precedence over the
    /// committed graph; `from_draft` tells the surface to notify the user.
    pub fn open_flow(&self, id: &str) -> Result<Option<OpenedFlow>, StoreError> {
        if let Some(draft) = self.get_draft(id)? {
            log::info!("flow '{}': loading unsaved draft over committed state", id);
            return Ok(Some(OpenedFlow {
                flow: draft,
                from_draft: true,
            }));
        }
        Ok(self.flow(id)?.map(|flow| OpenedFlow {
            flow,
            from_draft: false,
        }))
    }

    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
            key: key.to_string(),
            source: e,
        })?;
        self.storage.write(key, &raw)
    }
}
