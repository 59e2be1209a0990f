//! Default values for data fields
//!
//! Every static type maps to a constant used as the initial value of a
//! data field on the instance template. Two rules are observable and kept
//! as they are:
//!
//! - a union defaults to the default of its *first* declared member, so
//!   reordering members changes the initial field value;
//! - reference types (functions, classes, constructors, arrays) get a
//!   positive-zero number placeholder, since no object or closure is built
//!   for them at this stage.

use strix_types::{StaticType, TypeContext, TypeId};

use crate::ir::{IrBuilder, IrConstant};

/// Default constant for a field of type `ty`
pub fn default_value(types: &TypeContext, ty: &StaticType) -> IrConstant {
    match ty {
        StaticType::Void | StaticType::Any | StaticType::Mixed => IrBuilder::literal_undefined(),
        StaticType::Null => IrBuilder::literal_null(),
        StaticType::Boolean => IrBuilder::literal_bool(false),
        StaticType::String => IrBuilder::literal_string(""),
        StaticType::Number => IrBuilder::literal_positive_zero(),
        StaticType::BigInt => IrBuilder::literal_bigint_zero(),
        StaticType::Union(union) => match union.members.first() {
            Some(&first) => default_value_id(types, first),
            None => {
                debug_assert!(false, "union without members");
                tracing::error!("default value requested for an empty union");
                IrBuilder::literal_undefined()
            }
        },
        StaticType::Function(_)
        | StaticType::Class(_)
        | StaticType::ClassConstructor(_)
        | StaticType::Array(_) => IrBuilder::literal_positive_zero(),
    }
}

/// Default constant for the type stored at `id`
pub fn default_value_id(types: &TypeContext, id: TypeId) -> IrConstant {
    match types.get(id) {
        Some(ty) => default_value(types, ty),
        None => {
            debug_assert!(false, "dangling type id {}", id.as_u32());
            tracing::error!(type_id = id.as_u32(), "default value for dangling type id");
            IrBuilder::literal_undefined()
        }
    }
}
