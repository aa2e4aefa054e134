use crate::error::{RegistryError, StoreError};
use crate::store::Storage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Storage key for the function catalog.
pub const FUNCTIONS_KEY: &str = "javascriptFunctions";

/// A named argument a script function accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArg {
    pub name: String,
    #[serde(rename = "type")]
    pub arg_type: String,
}

/// A script function that script nodes can invoke by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub arguments: Vec<FunctionArg>,
    pub code: String,
    pub return_type: String,
}

/// Fields accepted when creating or replacing a function definition.
#[derive(Debug, Clone)]
pub struct FunctionInput {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<FunctionArg>,
    pub code: String,
    pub return_type: String,
}

impl FunctionInput {
    /// Name and code are the form's required fields.
    fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::MissingField("name"));
        }
        if self.code.trim().is_empty() {
            return Err(RegistryError::MissingField("code"));
        }
        Ok(())
    }
}

/// Persisted catalog of script functions with the same load/persist contract
/// as the variable registry.
pub struct FunctionRegistry {
    functions: Vec<FunctionDef>,
    storage: Option<Arc<dyn Storage>>,
}

impl FunctionRegistry {
    /// Loads the catalog from storage; absent or malformed records fall back
    /// to the built-in defaults.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let functions = match storage.read(FUNCTIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<FunctionDef>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    log::warn!(
                        "malformed '{}' record, using defaults: {}",
                        FUNCTIONS_KEY,
                        e
                    );
                    Self::default_functions()
                }
            },
            Ok(None) => Self::default_functions(),
            Err(e) => {
                log::warn!("could not read '{}', using defaults: {}", FUNCTIONS_KEY, e);
                Self::default_functions()
            }
        };

        Self {
            functions,
            storage: Some(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            functions: Self::default_functions(),
            storage: None,
        }
    }

    fn default_functions() -> Vec<FunctionDef> {
        vec![
            FunctionDef {
                id: "1".to_string(),
                name: "validateEmail".to_string(),
                description: Some("Validates email format".to_string()),
                arguments: vec![FunctionArg {
                    name: "email".to_string(),
                    arg_type: "string".to_string(),
                }],
                code: "function validateEmail(email) {\n  const regex = /^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$/;\n  return regex.test(email);\n}".to_string(),
                return_type: "boolean".to_string(),
            },
            FunctionDef {
                id: "2".to_string(),
                name: "formatCurrency".to_string(),
                description: Some("Formats number as currency".to_string()),
                arguments: vec![
                    FunctionArg {
                        name: "amount".to_string(),
                        arg_type: "number".to_string(),
                    },
                    FunctionArg {
                        name: "currency".to_string(),
                        arg_type: "string".to_string(),
                    },
                ],
                code: "function formatCurrency(amount, currency = \"USD\") {\n  return new Intl.NumberFormat(\"en-US\", {\n    style: \"currency\",\n    currency: currency\n  }).format(amount);\n}".to_string(),
                return_type: "string".to_string(),
            },
        ]
    }

    pub fn list(&self) -> &[FunctionDef] {
        &self.functions
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn add(&mut self, input: FunctionInput) -> Result<&FunctionDef, RegistryError> {
        input.validate()?;
        if self.get(&input.name).is_some() {
            return Err(RegistryError::DuplicateName(input.name));
        }
        self.functions.push(FunctionDef {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            arguments: input.arguments,
            code: input.code,
            return_type: input.return_type,
        });
        self.persist()?;
        Ok(self.functions.last().unwrap())
    }

    /// Replaces the definition with the given id, keeping its id.
    pub fn update(&mut self, id: &str, input: FunctionInput) -> Result<(), RegistryError> {
        input.validate()?;
        if self
            .functions
            .iter()
            .any(|f| f.id != id && f.name == input.name)
        {
            return Err(RegistryError::DuplicateName(input.name));
        }
        let func = self
            .functions
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        func.name = input.name;
        func.description = input.description;
        func.arguments = input.arguments;
        func.code = input.code;
        func.return_type = input.return_type;
        self.persist()?;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), RegistryError> {
        let before = self.functions.len();
        self.functions.retain(|f| f.id != id);
        if self.functions.len() == before {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.persist()?;
        Ok(())
    }

    fn persist(&self) -> Result<(), RegistryError> {
        if let Some(storage) = &self.storage {
            let raw = serde_json::to_string(&self.functions).map_err(|e| StoreError::Serialize {
                key: FUNCTIONS_KEY.to_string(),
                source: e,
            })?;
            storage.write(FUNCTIONS_KEY, &raw)?;
        }
        Ok(())
    }
}
