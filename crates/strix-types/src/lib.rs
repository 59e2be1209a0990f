//! Strix Type System
//!
//! The static type lattice produced by the checker, the type context that
//! owns it, and the typed syntax tree surface consumed by lowering.

#![warn(missing_docs)]

pub mod ast;
pub mod context;
pub mod error;
pub mod span;
pub mod ty;

pub use context::TypeContext;
pub use error::TypeError;
pub use span::Span;
pub use ty::{
    ArrayType, ClassConstructorType, ClassType, Field, FunctionType, StaticType, TypeId, UnionType,
};
