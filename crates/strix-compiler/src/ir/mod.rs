//! Intermediate Representation (IR) for Strix
//!
//! The IR sits between the type-checked AST and the later optimization and
//! code generation passes. Values live in typed virtual registers; functions
//! are lists of basic blocks.
//!
//! # Structure
//!
//! - `IrModule` - Top-level container: functions and binding storage
//! - `IrFunction` - A function with parameters and basic blocks
//! - `BasicBlock` - A sequence of instructions with a single entry and exit
//! - `IrInstr` - Object, closure and storage instructions
//! - `Register` - Virtual registers tagged with a `RuntimeType`
//! - `IrBuilder` - Append-only construction with a guarded insertion point

pub mod block;
pub mod builder;
pub mod function;
pub mod instr;
pub mod module;
pub mod pretty;
pub mod types;
pub mod value;

pub use block::{BasicBlock, BasicBlockId, Terminator};
pub use builder::{InsertionHost, InsertionPoint, IrBuilder, SaveRestore};
pub use function::IrFunction;
pub use instr::{BuiltinMethod, FunctionId, IrInstr, VariableId};
pub use module::{IrModule, IrVariable};
pub use pretty::PrettyPrint;
pub use types::RuntimeType;
pub use value::{IrConstant, IrValue, Register, RegisterId};
