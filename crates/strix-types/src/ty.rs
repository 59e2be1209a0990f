//! Core type definitions for the Strix static type system

use std::fmt;
use std::sync::Arc;

use crate::ast::FunctionExpression;

/// Unique identifier for a type in the type context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Pre-allocated `void`
    pub const VOID: TypeId = TypeId(0);
    /// Pre-allocated `null`
    pub const NULL: TypeId = TypeId(1);
    /// Pre-allocated `boolean`
    pub const BOOLEAN: TypeId = TypeId(2);
    /// Pre-allocated `string`
    pub const STRING: TypeId = TypeId(3);
    /// Pre-allocated `number`
    pub const NUMBER: TypeId = TypeId(4);
    /// Pre-allocated `bigint`
    pub const BIGINT: TypeId = TypeId(5);
    /// Pre-allocated `any`
    pub const ANY: TypeId = TypeId(6);
    /// Pre-allocated `mixed`
    pub const MIXED: TypeId = TypeId(7);

    /// Get the raw ID value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Union type: T1 | T2 | ... | Tn
///
/// Member order is the declaration order and is significant: the first
/// member supplies the default value of union-typed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    /// Members of the union, never empty
    pub members: Vec<TypeId>,
}

/// Function type: (T1, T2, ..., Tn) => R
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    /// Parameter types
    pub params: Vec<TypeId>,
    /// Return type
    pub return_type: TypeId,
}

/// Array type: T[]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// Element type
    pub element: TypeId,
}

/// A field of a class or home object type
///
/// A field is a method exactly when it carries a method body.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name, unique within its class
    pub name: String,
    /// Declared type of the field
    pub ty: TypeId,
    /// Method body for method fields
    pub method: Option<Arc<FunctionExpression>>,
}

impl Field {
    /// Create a data field
    pub fn data(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            method: None,
        }
    }

    /// Create a method field
    pub fn method(name: impl Into<String>, ty: TypeId, body: Arc<FunctionExpression>) -> Self {
        Self {
            name: name.into(),
            ty,
            method: Some(body),
        }
    }

    /// Check if this field is a method
    pub fn is_method(&self) -> bool {
        self.method.is_some()
    }
}

/// Class type (nominal)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassType {
    /// Class name, `None` for anonymous classes
    pub name: Option<String>,
    /// Fields in declaration order; the order is the object layout order
    pub fields: Vec<Field>,
    /// Type of the explicit constructor, if the class declares one
    pub constructor_type: Option<TypeId>,
    /// Shape of the shared instance template (the prototype object)
    pub home_object: Option<TypeId>,
}

impl ClassType {
    /// Create an empty class type
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the explicit constructor type
    pub fn with_constructor(mut self, ty: TypeId) -> Self {
        self.constructor_type = Some(ty);
        self
    }

    /// Set the home object type
    pub fn with_home_object(mut self, ty: TypeId) -> Self {
        self.home_object = Some(ty);
        self
    }

    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of method fields
    pub fn method_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_method()).count()
    }
}

/// Type of a class name binding: the constructor of a class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassConstructorType {
    /// The constructed class, always a [`StaticType::Class`]
    pub class: TypeId,
}

/// The static type lattice
///
/// Closed: every consumer matches all variants without a wildcard arm, so
/// a new variant is a compile error until each consumer handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticType {
    /// `void`
    Void,
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// `string`
    String,
    /// `number`
    Number,
    /// `bigint`
    BigInt,
    /// `any`
    Any,
    /// `mixed`
    Mixed,
    /// Union type: T1 | T2 | ... | Tn
    Union(UnionType),
    /// Function type: (params) => return
    Function(FunctionType),
    /// Class type (nominal)
    Class(ClassType),
    /// Class constructor type
    ClassConstructor(ClassConstructorType),
    /// Array type: T[]
    Array(ArrayType),
}

impl StaticType {
    /// Short name of the variant, used in logs and diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            StaticType::Void => "void",
            StaticType::Null => "null",
            StaticType::Boolean => "boolean",
            StaticType::String => "string",
            StaticType::Number => "number",
            StaticType::BigInt => "bigint",
            StaticType::Any => "any",
            StaticType::Mixed => "mixed",
            StaticType::Union(_) => "union",
            StaticType::Function(_) => "function",
            StaticType::Class(_) => "class",
            StaticType::ClassConstructor(_) => "class constructor",
            StaticType::Array(_) => "array",
        }
    }

    /// Check if this type is a union type
    pub fn is_union(&self) -> bool {
        matches!(self, StaticType::Union(_))
    }

    /// Get the union type if this is a union
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            StaticType::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Get the class type if this is a class
    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            StaticType::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Get the constructor type if this is a class constructor
    pub fn as_class_constructor(&self) -> Option<&ClassConstructorType> {
        match self {
            StaticType::ClassConstructor(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_field_is_method() {
        let body = Arc::new(FunctionExpression::new(vec![], vec![], Span::default()));
        assert!(Field::method("greet", TypeId::ANY, body).is_method());
        assert!(!Field::data("x", TypeId::NUMBER).is_method());
    }

    #[test]
    fn test_class_type_builder() {
        let body = Arc::new(FunctionExpression::new(vec![], vec![], Span::default()));
        let class = ClassType::new(Some("Point"))
            .with_field(Field::data("x", TypeId::NUMBER))
            .with_field(Field::method("norm", TypeId::ANY, body));

        assert_eq!(class.name.as_deref(), Some("Point"));
        assert_eq!(class.fields.len(), 2);
        assert_eq!(class.method_count(), 1);
        assert_eq!(class.get_field("x").map(|f| f.ty), Some(TypeId::NUMBER));
        assert!(class.constructor_type.is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(StaticType::BigInt.kind_name(), "bigint");
        let union = StaticType::Union(UnionType {
            members: vec![TypeId::NUMBER],
        });
        assert!(union.is_union());
        assert_eq!(union.kind_name(), "union");
        assert!(StaticType::Void.as_class().is_none());
    }
}
