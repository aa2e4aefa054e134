use crate::error::RegistryError;
use crate::store::Storage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Storage key for the user-defined variable list.
pub const VARIABLES_KEY: &str = "globalVariables";

/// The three value types a symbol can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolType {
    String,
    Number,
    Boolean,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolType::String => write!(f, "String"),
            SymbolType::Number => write!(f, "Number"),
            SymbolType::Boolean => write!(f, "Boolean"),
        }
    }
}

/// A named, typed value in one of the two reference namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: String,
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub symbol_type: SymbolType,
}

/// The namespace a registry serves. Tags are referenced with `#`,
/// variables with `$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Tag,
    Variable,
}

impl Namespace {
    pub fn sigil(self) -> char {
        match self {
            Namespace::Tag => '#',
            Namespace::Variable => '$',
        }
    }
}

/// Partial update applied to an existing symbol.
#[derive(Debug, Default, Clone)]
pub struct SymbolPatch {
    pub name: Option<String>,
    pub value: Option<String>,
    pub symbol_type: Option<SymbolType>,
}

/// Ordered, name-unique collection of symbols for one namespace.
///
/// The variable registry persists its full list on every mutation. The tag
/// registry is a fixed catalog and rejects mutation.
pub struct SymbolRegistry {
    namespace: Namespace,
    symbols: Vec<Symbol>,
    storage: Option<Arc<dyn Storage>>,
    read_only: bool,
}

impl SymbolRegistry {
    /// The fixed tag catalog. Read-only at edit time.
    pub fn tag_catalog() -> Self {
        let symbols = [
            ("environment", "production", SymbolType::String),
            ("version", "1.2.3", SymbolType::String),
            ("region", "us-east-1", SymbolType::String),
            ("debug", "false", SymbolType::Boolean),
            ("timestamp", "1234567888", SymbolType::Number),
            ("user_id", "user123", SymbolType::String),
            ("feature_flag", "true", SymbolType::Boolean),
            ("max_connections", "100", SymbolType::Number),
            ("timeout_seconds", "30", SymbolType::Number),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, value, ty))| Symbol {
            id: (i + 1).to_string(),
            name: name.to_string(),
            value: value.to_string(),
            symbol_type: *ty,
        })
        .collect();

        Self {
            namespace: Namespace::Tag,
            symbols,
            storage: None,
            read_only: true,
        }
    }

    /// Loads the variable registry from storage, falling back to the default
    /// set when the key is absent or its JSON is malformed. Corrupt storage
    /// is logged and treated as empty, never fatal.
    pub fn variables(storage: Arc<dyn Storage>) -> Self {
        let symbols = match storage.read(VARIABLES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Symbol>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!(
                        "malformed '{}' record, using defaults: {}",
                        VARIABLES_KEY,
                        e
                    );
                    Self::default_variables()
                }
            },
            Ok(None) => Self::default_variables(),
            Err(e) => {
                log::warn!("could not read '{}', using defaults: {}", VARIABLES_KEY, e);
                Self::default_variables()
            }
        };

        Self {
            namespace: Namespace::Variable,
            symbols,
            storage: Some(storage),
            read_only: false,
        }
    }

    /// An unpersisted, mutable variable registry. Useful for embedding
    /// without a durable store.
    pub fn variables_in_memory() -> Self {
        Self {
            namespace: Namespace::Variable,
            symbols: Self::default_variables(),
            storage: None,
            read_only: false,
        }
    }

    fn default_variables() -> Vec<Symbol> {
        vec![
            Symbol {
                id: "1".to_string(),
                name: "API_URL".to_string(),
                value: "https://api.example.com".to_string(),
                symbol_type: SymbolType::String,
            },
            Symbol {
                id: "2".to_string(),
                name: "MAX_RETRIES".to_string(),
                value: "3".to_string(),
                symbol_type: SymbolType::Number,
            },
            Symbol {
                id: "3".to_string(),
                name: "TIMEOUT".to_string(),
                value: "5000".to_string(),
                symbol_type: SymbolType::Number,
            },
        ]
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// All symbols, in insertion order.
    pub fn list(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Exact, case-sensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Resolves a sigil-prefixed reference (`#name` or `$name`) against this
    /// namespace. References with the wrong sigil never resolve.
    pub fn resolve(&self, reference: &str) -> Option<&Symbol> {
        let name = reference.strip_prefix(self.namespace.sigil())?;
        self.get(name)
    }

    /// Adds a symbol, enforcing name uniqueness within the namespace.
    pub fn add(
        &mut self,
        name: &str,
        value: &str,
        symbol_type: SymbolType,
    ) -> Result<&Symbol, RegistryError> {
        if self.read_only {
            return Err(RegistryError::ReadOnly);
        }
        if name.is_empty() {
            return Err(RegistryError::MissingField("name"));
        }
        if self.get(name).is_some() {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        self.symbols.push(Symbol {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            value: value.to_string(),
            symbol_type,
        });
        self.persist()?;
        Ok(self.symbols.last().unwrap())
    }

    /// Applies a partial update to the symbol with the given id.
    pub fn update(&mut self, id: &str, patch: SymbolPatch) -> Result<(), RegistryError> {
        if self.read_only {
            return Err(RegistryError::ReadOnly);
        }
        if let Some(new_name) = &patch.name {
            if self.symbols.iter().any(|s| s.id != id && &s.name == new_name) {
                return Err(RegistryError::DuplicateName(new_name.clone()));
            }
        }
        let symbol = self
            .symbols
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        if let Some(name) = patch.name {
            symbol.name = name;
        }
        if let Some(value) = patch.value {
            symbol.value = value;
        }
        if let Some(ty) = patch.symbol_type {
            symbol.symbol_type = ty;
        }
        self.persist()?;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), RegistryError> {
        if self.read_only {
            return Err(RegistryError::ReadOnly);
        }
        let before = self.symbols.len();
        self.symbols.retain(|s| s.id != id);
        if self.symbols.len() == before {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.persist()?;
        Ok(())
    }

    fn persist(&self) -> Result<(), RegistryError> {
        if let Some(storage) = &self.storage {
            let raw = serde_json::to_string(&self.symbols).map_err(|e| {
                crate::error::StoreError::Serialize {
                    key: VARIABLES_KEY.to_string(),
                    source: e,
                }
            })?;
            storage.write(VARIABLES_KEY, &raw)?;
        }
        Ok(())
    }
}
