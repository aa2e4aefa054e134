//! Symbol and function registries: flat, name-unique catalogs with
//! persist-on-mutation semantics.

mod function;
mod symbol;

pub use function::{FunctionArg, FunctionDef, FunctionInput, FunctionRegistry, FUNCTIONS_KEY};
pub use symbol::{Namespace, Symbol, SymbolPatch, SymbolRegistry, SymbolType, VARIABLES_KEY};
