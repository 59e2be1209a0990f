//! IR Instructions
//!
//! Object, closure and storage instructions emitted by class lowering.

use super::value::{IrValue, Register};

/// Function identifier in the IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub u32);

impl FunctionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn{}", self.0)
    }
}

/// Storage location of a source-level binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(pub u32);

impl VariableId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Runtime builtins callable through [`IrInstr::CallBuiltin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMethod {
    /// `(object, parent)`: set the prototype without property checks or traps
    SilentSetPrototypeOf,
}

impl BuiltinMethod {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinMethod::SilentSetPrototypeOf => "silentSetPrototypeOf",
        }
    }

    /// Number of arguments the builtin expects
    pub fn arity(&self) -> usize {
        match self {
            BuiltinMethod::SilentSetPrototypeOf => 2,
        }
    }
}

impl std::fmt::Display for BuiltinMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// IR instruction
#[derive(Debug, Clone, PartialEq)]
pub enum IrInstr {
    /// Allocate an object with room for `size_hint` properties:
    /// dest = {} with optional prototype `parent`
    AllocObject {
        dest: Register,
        size_hint: u32,
        parent: Option<IrValue>,
    },

    /// Allocate an object with all properties at once: dest = { k: v, ... }
    ///
    /// Keys are kept in insertion order; that order is the object layout.
    AllocObjectLiteral {
        dest: Register,
        properties: Vec<(String, IrValue)>,
    },

    /// Create a closure for a function: dest = closure(func)
    CreateFunction { dest: Register, func: FunctionId },

    /// object[property] = value, unconditionally and in strict mode
    ///
    /// Writes the existing slot even when it is non-configurable.
    StorePropertyStrict {
        object: IrValue,
        property: String,
        value: IrValue,
    },

    /// Define a property that is known not to exist yet
    StoreNewOwnProperty {
        object: IrValue,
        property: String,
        value: IrValue,
    },

    /// Store into a binding's storage location
    ///
    /// `declaring` marks the single initializing store of the binding.
    StoreVariable {
        variable: VariableId,
        value: IrValue,
        declaring: bool,
    },

    /// Call a runtime builtin
    CallBuiltin {
        dest: Option<Register>,
        builtin: BuiltinMethod,
        args: Vec<IrValue>,
    },
}

impl IrInstr {
    /// Get the destination register if this instruction produces a value
    pub fn dest(&self) -> Option<&Register> {
        match self {
            IrInstr::AllocObject { dest, .. }
            | IrInstr::AllocObjectLiteral { dest, .. }
            | IrInstr::CreateFunction { dest, .. } => Some(dest),
            IrInstr::CallBuiltin { dest, .. } => dest.as_ref(),
            IrInstr::StorePropertyStrict { .. }
            | IrInstr::StoreNewOwnProperty { .. }
            | IrInstr::StoreVariable { .. } => None,
        }
    }

    /// Check if this instruction has side effects
    pub fn has_side_effects(&self) -> bool {
        matches!(
            self,
            IrInstr::StorePropertyStrict { .. }
                | IrInstr::StoreNewOwnProperty { .. }
                | IrInstr::StoreVariable { .. }
                | IrInstr::CallBuiltin { .. }
        )
    }
}
