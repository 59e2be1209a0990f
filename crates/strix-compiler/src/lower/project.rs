//! Static type to runtime type projection

use strix_types::{StaticType, TypeContext, TypeId};

use crate::ir::RuntimeType;

/// Project a static type onto the IR runtime-type lattice
///
/// Unions join the projection of every member, starting from `NO_TYPE`.
pub fn project(types: &TypeContext, ty: &StaticType) -> RuntimeType {
    match ty {
        StaticType::Void => RuntimeType::UNDEFINED,
        StaticType::Null => RuntimeType::NULL,
        StaticType::Boolean => RuntimeType::BOOLEAN,
        StaticType::String => RuntimeType::STRING,
        StaticType::Number => RuntimeType::NUMBER,
        StaticType::BigInt => RuntimeType::BIGINT,
        StaticType::Any | StaticType::Mixed => RuntimeType::UNKNOWN,
        StaticType::Function(_) | StaticType::ClassConstructor(_) => RuntimeType::CLOSURE,
        StaticType::Class(_) | StaticType::Array(_) => RuntimeType::OBJECT,
        StaticType::Union(union) => {
            debug_assert!(!union.members.is_empty(), "union without members");
            union
                .members
                .iter()
                .fold(RuntimeType::NO_TYPE, |acc, &member| {
                    acc.join(project_id(types, member))
                })
        }
    }
}

/// Project the type stored at `id`
pub fn project_id(types: &TypeContext, id: TypeId) -> RuntimeType {
    match types.get(id) {
        Some(ty) => project(types, ty),
        None => {
            debug_assert!(false, "dangling type id {}", id.as_u32());
            tracing::error!(type_id = id.as_u32(), "projecting dangling type id");
            RuntimeType::UNKNOWN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strix_types::{ClassType, Field};

    const PRIMITIVES: [TypeId; 8] = [
        TypeId::VOID,
        TypeId::NULL,
        TypeId::BOOLEAN,
        TypeId::STRING,
        TypeId::NUMBER,
        TypeId::BIGINT,
        TypeId::ANY,
        TypeId::MIXED,
    ];

    #[test]
    fn test_primitives() {
        let types = TypeContext::new();
        assert_eq!(project_id(&types, TypeId::VOID), RuntimeType::UNDEFINED);
        assert_eq!(project_id(&types, TypeId::NULL), RuntimeType::NULL);
        assert_eq!(project_id(&types, TypeId::BOOLEAN), RuntimeType::BOOLEAN);
        assert_eq!(project_id(&types, TypeId::STRING), RuntimeType::STRING);
        assert_eq!(project_id(&types, TypeId::NUMBER), RuntimeType::NUMBER);
        assert_eq!(project_id(&types, TypeId::BIGINT), RuntimeType::BIGINT);
        assert_eq!(project_id(&types, TypeId::ANY), RuntimeType::UNKNOWN);
        assert_eq!(project_id(&types, TypeId::MIXED), RuntimeType::UNKNOWN);
    }

    #[test]
    fn test_reference_types() {
        let mut types = TypeContext::new();
        let func = types.function(vec![TypeId::NUMBER], TypeId::VOID).unwrap();
        let array = types.array(TypeId::STRING).unwrap();
        let class = types
            .class(ClassType::new(Some("Point")).with_field(Field::data("x", TypeId::NUMBER)))
            .unwrap();
        let ctor = types.class_constructor(class).unwrap();

        assert_eq!(project_id(&types, func), RuntimeType::CLOSURE);
        assert_eq!(project_id(&types, ctor), RuntimeType::CLOSURE);
        assert_eq!(project_id(&types, class), RuntimeType::OBJECT);
        assert_eq!(project_id(&types, array), RuntimeType::OBJECT);
    }

    #[test]
    fn test_union_of_every_pair_is_join_and_commutes() {
        let mut types = TypeContext::new();
        for &a in &PRIMITIVES {
            for &b in &PRIMITIVES {
                let ab = types.union(vec![a, b]).unwrap();
                let ba = types.union(vec![b, a]).unwrap();
                let expected = project_id(&types, a).join(project_id(&types, b));
                assert_eq!(project_id(&types, ab), expected);
                assert_eq!(project_id(&types, ab), project_id(&types, ba));
            }
        }
    }

    #[test]
    fn test_single_member_union() {
        let mut types = TypeContext::new();
        let u = types.union(vec![TypeId::STRING]).unwrap();
        assert_eq!(project_id(&types, u), RuntimeType::STRING);
    }

    #[test]
    fn test_nested_union() {
        let mut types = TypeContext::new();
        let inner = types.union(vec![TypeId::NULL, TypeId::NUMBER]).unwrap();
        let outer = types.union(vec![inner, TypeId::STRING]).unwrap();
        let projected = project_id(&types, outer);
        assert!(projected.contains(RuntimeType::NULL));
        assert!(projected.contains(RuntimeType::NUMBER));
        assert!(projected.contains(RuntimeType::STRING));
        assert_eq!(projected.tag_count(), 3);
    }
}
