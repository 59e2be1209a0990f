//! Type context owning every static type of a compilation

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ast::DeclId;
use crate::error::TypeError;
use crate::ty::{
    ArrayType, ClassConstructorType, ClassType, FunctionType, StaticType, TypeId, UnionType,
};

/// Type context that owns all types in a program
///
/// Types live in an arena indexed by [`TypeId`]. The primitive variants are
/// allocated up front at the fixed ids exposed as `TypeId::VOID` through
/// `TypeId::MIXED`. The context also records the declared type of every
/// binding the checker resolved, which is what lowering reads back through
/// [`TypeContext::find_declared_type`].
#[derive(Debug, Clone)]
pub struct TypeContext {
    /// Storage for all types, indexed by TypeId
    types: Vec<Arc<StaticType>>,

    /// Declared type of each resolved binding
    declared: FxHashMap<DeclId, TypeId>,
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeContext {
    /// Create a context holding only the primitive types
    pub fn new() -> Self {
        let mut ctx = TypeContext {
            types: Vec::new(),
            declared: FxHashMap::default(),
        };

        // Order must match the TypeId constants
        ctx.alloc(StaticType::Void);
        ctx.alloc(StaticType::Null);
        ctx.alloc(StaticType::Boolean);
        ctx.alloc(StaticType::String);
        ctx.alloc(StaticType::Number);
        ctx.alloc(StaticType::BigInt);
        ctx.alloc(StaticType::Any);
        ctx.alloc(StaticType::Mixed);

        ctx
    }

    fn alloc(&mut self, ty: StaticType) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(Arc::new(ty));
        id
    }

    fn check(&self, id: TypeId) -> Result<&StaticType, TypeError> {
        self.get(id).ok_or(TypeError::UndefinedType { id })
    }

    /// Get a type by its TypeId
    pub fn get(&self, id: TypeId) -> Option<&StaticType> {
        self.types.get(id.0 as usize).map(|arc| arc.as_ref())
    }

    /// Number of types in the context, primitives included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the primitives are allocated on construction
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Create a union of `members`, in the given order
    pub fn union(&mut self, members: Vec<TypeId>) -> Result<TypeId, TypeError> {
        if members.is_empty() {
            return Err(TypeError::EmptyUnion);
        }
        for &member in &members {
            self.check(member)?;
        }
        Ok(self.alloc(StaticType::Union(UnionType { members })))
    }

    /// Create a function type
    pub fn function(&mut self, params: Vec<TypeId>, return_type: TypeId) -> Result<TypeId, TypeError> {
        for &param in &params {
            self.check(param)?;
        }
        self.check(return_type)?;
        Ok(self.alloc(StaticType::Function(FunctionType {
            params,
            return_type,
        })))
    }

    /// Create an array type
    pub fn array(&mut self, element: TypeId) -> Result<TypeId, TypeError> {
        self.check(element)?;
        Ok(self.alloc(StaticType::Array(ArrayType { element })))
    }

    /// Add a class type
    ///
    /// Classes are nominal, so every call creates a distinct type even when
    /// two descriptors are structurally equal.
    pub fn class(&mut self, class: ClassType) -> Result<TypeId, TypeError> {
        for field in &class.fields {
            self.check(field.ty)?;
        }
        if let Some(ctor) = class.constructor_type {
            self.check(ctor)?;
        }
        if let Some(home) = class.home_object {
            let home_ty = self.check(home)?;
            if home_ty.as_class().is_none() {
                return Err(TypeError::NotAClass {
                    actual: home_ty.kind_name(),
                });
            }
        }
        Ok(self.alloc(StaticType::Class(class)))
    }

    /// Create the constructor type of `class`
    pub fn class_constructor(&mut self, class: TypeId) -> Result<TypeId, TypeError> {
        let target = self.check(class)?;
        if target.as_class().is_none() {
            return Err(TypeError::NotAClass {
                actual: target.kind_name(),
            });
        }
        Ok(self.alloc(StaticType::ClassConstructor(ClassConstructorType { class })))
    }

    /// Get the class type behind `id`, if it is a class
    pub fn class_type(&self, id: TypeId) -> Option<&ClassType> {
        self.get(id).and_then(StaticType::as_class)
    }

    /// Record the declared type of a binding
    pub fn declare(&mut self, decl: DeclId, ty: TypeId) {
        self.declared.insert(decl, ty);
    }

    /// Declared type of a binding, `None` if the binding carries no static type
    pub fn find_declared_type(&self, decl: DeclId) -> Option<TypeId> {
        self.declared.get(&decl).copied()
    }

    /// Render a type for humans
    pub fn display(&self, id: TypeId) -> String {
        let Some(ty) = self.get(id) else {
            return format!("<invalid {}>", id);
        };
        match ty {
            StaticType::Union(u) => u
                .members
                .iter()
                .map(|&m| self.display(m))
                .collect::<Vec<_>>()
                .join(" | "),
            StaticType::Function(func) => {
                let params: Vec<String> = func.params.iter().map(|&p| self.display(p)).collect();
                format!("({}) => {}", params.join(", "), self.display(func.return_type))
            }
            StaticType::Array(a) => format!("{}[]", self.display(a.element)),
            StaticType::Class(c) => format!("class {}", c.name.as_deref().unwrap_or("<anonymous>")),
            StaticType::ClassConstructor(c) => format!("typeof {}", self.display(c.class)),
            other => other.kind_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::Field;

    #[test]
    fn test_primitives_preallocated() {
        let ctx = TypeContext::new();
        assert_eq!(ctx.get(TypeId::VOID), Some(&StaticType::Void));
        assert_eq!(ctx.get(TypeId::NUMBER), Some(&StaticType::Number));
        assert_eq!(ctx.get(TypeId::MIXED), Some(&StaticType::Mixed));
        assert_eq!(ctx.len(), 8);
    }

    #[test]
    fn test_empty_union_rejected() {
        let mut ctx = TypeContext::new();
        assert_eq!(ctx.union(vec![]), Err(TypeError::EmptyUnion));
    }

    #[test]
    fn test_union_keeps_member_order() {
        let mut ctx = TypeContext::new();
        let id = ctx.union(vec![TypeId::STRING, TypeId::NUMBER]).unwrap();
        let members = &ctx.get(id).unwrap().as_union().unwrap().members;
        assert_eq!(members, &vec![TypeId::STRING, TypeId::NUMBER]);
        assert_eq!(ctx.display(id), "string | number");
    }

    #[test]
    fn test_dangling_member_rejected() {
        let mut ctx = TypeContext::new();
        let bogus = TypeId(999);
        assert_eq!(
            ctx.union(vec![bogus]),
            Err(TypeError::UndefinedType { id: bogus })
        );
    }

    #[test]
    fn test_class_constructor_requires_class() {
        let mut ctx = TypeContext::new();
        assert_eq!(
            ctx.class_constructor(TypeId::NUMBER),
            Err(TypeError::NotAClass { actual: "number" })
        );

        let class = ctx
            .class(ClassType::new(Some("Point")).with_field(Field::data("x", TypeId::NUMBER)))
            .unwrap();
        let ctor = ctx.class_constructor(class).unwrap();
        assert_eq!(ctx.display(ctor), "typeof class Point");
    }

    #[test]
    fn test_classes_are_nominal() {
        let mut ctx = TypeContext::new();
        let a = ctx.class(ClassType::new(Some("A"))).unwrap();
        let b = ctx.class(ClassType::new(Some("A"))).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_declared_types() {
        let mut ctx = TypeContext::new();
        let decl = DeclId::new(3);
        assert_eq!(ctx.find_declared_type(decl), None);
        ctx.declare(decl, TypeId::STRING);
        assert_eq!(ctx.find_declared_type(decl), Some(TypeId::STRING));
    }

    #[test]
    fn test_display_nested() {
        let mut ctx = TypeContext::new();
        let arr = ctx.array(TypeId::NUMBER).unwrap();
        let func = ctx.function(vec![arr, TypeId::STRING], TypeId::VOID).unwrap();
        assert_eq!(ctx.display(func), "(number[], string) => void");
    }
}
