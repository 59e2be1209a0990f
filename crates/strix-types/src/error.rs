//! Type system errors

use thiserror::Error;

use crate::ty::TypeId;

/// Errors that can occur while building types in a [`TypeContext`](crate::TypeContext)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// A union was built with no members
    #[error("Invalid union type: a union needs at least one member")]
    EmptyUnion,

    /// A TypeId that does not belong to this context
    #[error("Undefined type: {id}")]
    UndefinedType {
        /// The dangling id
        id: TypeId,
    },

    /// A class constructor was built around something that is not a class
    #[error("Expected a class type, got {actual}")]
    NotAClass {
        /// Variant name of the offending type
        actual: &'static str,
    },
}
