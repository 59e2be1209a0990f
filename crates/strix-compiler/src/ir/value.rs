//! IR Values and Registers
//!
//! Defines the value types used in IR instructions.

use super::types::RuntimeType;

/// Virtual register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(pub u32);

impl RegisterId {
    /// Create a new register ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RegisterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Register with its runtime type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub id: RegisterId,
    pub ty: RuntimeType,
}

impl Register {
    /// Create a new register
    pub fn new(id: RegisterId, ty: RuntimeType) -> Self {
        Self { id, ty }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.ty)
    }
}

/// Instruction operands
#[derive(Debug, Clone, PartialEq)]
pub enum IrValue {
    /// A register reference
    Register(Register),
    /// A literal constant
    Constant(IrConstant),
}

impl IrValue {
    /// Runtime type of the operand
    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            IrValue::Register(reg) => reg.ty,
            IrValue::Constant(c) => c.runtime_type(),
        }
    }

    /// Try to get as register
    pub fn as_register(&self) -> Option<&Register> {
        match self {
            IrValue::Register(reg) => Some(reg),
            IrValue::Constant(_) => None,
        }
    }

    /// Try to get as constant
    pub fn as_constant(&self) -> Option<&IrConstant> {
        match self {
            IrValue::Register(_) => None,
            IrValue::Constant(c) => Some(c),
        }
    }
}

impl From<Register> for IrValue {
    fn from(reg: Register) -> Self {
        IrValue::Register(reg)
    }
}

impl From<IrConstant> for IrValue {
    fn from(c: IrConstant) -> Self {
        IrValue::Constant(c)
    }
}

impl std::fmt::Display for IrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrValue::Register(reg) => write!(f, "{}", reg),
            IrValue::Constant(c) => write!(f, "{}", c),
        }
    }
}

/// Constant values in IR
#[derive(Debug, Clone, PartialEq)]
pub enum IrConstant {
    Undefined,
    Null,
    Boolean(bool),
    /// IEEE 754 double; `0.0` and `-0.0` are distinct constants
    Number(f64),
    String(String),
    /// Decimal digits of a big integer
    BigInt(String),
}

impl IrConstant {
    /// Runtime type of the constant
    pub fn runtime_type(&self) -> RuntimeType {
        match self {
            IrConstant::Undefined => RuntimeType::UNDEFINED,
            IrConstant::Null => RuntimeType::NULL,
            IrConstant::Boolean(_) => RuntimeType::BOOLEAN,
            IrConstant::Number(_) => RuntimeType::NUMBER,
            IrConstant::String(_) => RuntimeType::STRING,
            IrConstant::BigInt(_) => RuntimeType::BIGINT,
        }
    }

    /// Check if this is `+0`
    pub fn is_positive_zero(&self) -> bool {
        matches!(self, IrConstant::Number(v) if *v == 0.0 && v.is_sign_positive())
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IrConstant::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            IrConstant::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IrConstant::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for IrConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrConstant::Undefined => write!(f, "undefined"),
            IrConstant::Null => write!(f, "null"),
            IrConstant::Boolean(b) => write!(f, "{}", b),
            IrConstant::Number(v) if *v == 0.0 && v.is_sign_negative() => write!(f, "-0"),
            IrConstant::Number(v) => write!(f, "{}", v),
            IrConstant::String(s) => write!(f, "\"{}\"", s.escape_default()),
            IrConstant::BigInt(digits) => write!(f, "{}n", digits),
        }
    }
}
