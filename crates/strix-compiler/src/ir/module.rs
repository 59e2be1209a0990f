//! IR Module
//!
//! Top-level container for a compiled module.

use super::function::IrFunction;
use super::instr::{FunctionId, VariableId};
use rustc_hash::FxHashMap;

/// Storage location for a source-level binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrVariable {
    /// Source name of the binding
    pub name: String,
    /// Function whose scope owns the storage
    pub owner: FunctionId,
}

/// An IR module (compilation unit)
#[derive(Debug, Clone)]
pub struct IrModule {
    /// Module name
    pub name: String,
    /// Functions in this module
    pub functions: Vec<IrFunction>,
    /// Binding storage locations
    pub variables: Vec<IrVariable>,
    /// Function lookup by name (named functions only; first definition wins)
    function_map: FxHashMap<String, FunctionId>,
}

impl IrModule {
    /// Create a new empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            variables: Vec::new(),
            function_map: FxHashMap::default(),
        }
    }

    /// Add a function to the module
    pub fn add_function(&mut self, func: IrFunction) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        if let Some(name) = &func.name {
            self.function_map.entry(name.clone()).or_insert(id);
        }
        self.functions.push(func);
        id
    }

    /// Add a variable to the module
    pub fn add_variable(&mut self, variable: IrVariable) -> VariableId {
        let id = VariableId(self.variables.len() as u32);
        self.variables.push(variable);
        id
    }

    /// Get a function by ID
    pub fn get_function(&self, id: FunctionId) -> Option<&IrFunction> {
        self.functions.get(id.0 as usize)
    }

    /// Get a function by ID mutably
    pub fn get_function_mut(&mut self, id: FunctionId) -> Option<&mut IrFunction> {
        self.functions.get_mut(id.0 as usize)
    }

    /// Get a function by name
    pub fn get_function_by_name(&self, name: &str) -> Option<&IrFunction> {
        self.function_map
            .get(name)
            .and_then(|&id| self.get_function(id))
    }

    /// Get a function ID by name
    pub fn get_function_id(&self, name: &str) -> Option<FunctionId> {
        self.function_map.get(name).copied()
    }

    /// Get a variable by ID
    pub fn get_variable(&self, id: VariableId) -> Option<&IrVariable> {
        self.variables.get(id.0 as usize)
    }

    /// Get the number of functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Iterate over all functions
    pub fn functions(&self) -> impl Iterator<Item = &IrFunction> {
        self.functions.iter()
    }

    /// Validate the entire module
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (i, func) in self.functions.iter().enumerate() {
            if let Err(e) = func.validate() {
                errors.push(format!("Function '{}' ({}): {}", func.display_name(), i, e));
            }
        }

        for (i, var) in self.variables.iter().enumerate() {
            if self.get_function(var.owner).is_none() {
                errors.push(format!(
                    "Variable '{}' (v{}) is owned by missing function {}",
                    var.name, i, var.owner
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Get total instruction count across all functions
    pub fn total_instruction_count(&self) -> usize {
        self.functions.iter().map(|f| f.instruction_count()).sum()
    }
}
