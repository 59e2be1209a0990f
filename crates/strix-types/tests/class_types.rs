//! Integration tests for class types and their declarations

use std::sync::Arc;

use strix_types::ast::{
    ClassBody, ClassMember, DeclId, FunctionExpression, Identifier, MethodDefinition, MethodKind,
};
use strix_types::{ClassType, Field, Span, StaticType, TypeContext, TypeError, TypeId};

fn greet_body() -> Arc<FunctionExpression> {
    Arc::new(FunctionExpression::new(vec![], vec![], Span::new(20, 34, 2, 5)))
}

#[test]
fn test_class_with_home_object_resolves_through_declaration() {
    let mut ctx = TypeContext::new();
    let body = greet_body();

    let home = ctx
        .class(
            ClassType::new(Some("Greeter"))
                .with_field(Field::data("name", TypeId::STRING))
                .with_field(Field::method("greet", TypeId::ANY, body.clone())),
        )
        .unwrap();
    let class = ctx
        .class(ClassType::new(Some("Greeter")).with_home_object(home))
        .unwrap();
    let ctor = ctx.class_constructor(class).unwrap();
    ctx.declare(DeclId::new(1), ctor);

    let declared = ctx.find_declared_type(DeclId::new(1)).unwrap();
    let StaticType::ClassConstructor(ctor_ty) = ctx.get(declared).unwrap() else {
        panic!("declared type should be a constructor");
    };
    let class_ty = ctx.class_type(ctor_ty.class).unwrap();
    let home_ty = ctx.class_type(class_ty.home_object.unwrap()).unwrap();

    assert_eq!(home_ty.fields.len(), 2);
    assert_eq!(home_ty.method_count(), 1);
    let greet = home_ty.get_field("greet").unwrap();
    assert!(greet.is_method());
    assert!(Arc::ptr_eq(greet.method.as_ref().unwrap(), &body));
}

#[test]
fn test_home_object_must_be_class() {
    let mut ctx = TypeContext::new();
    let result = ctx.class(ClassType::new(Some("Bad")).with_home_object(TypeId::STRING));
    assert_eq!(result, Err(TypeError::NotAClass { actual: "string" }));
}

#[test]
fn test_constructor_member_lookup() {
    let ctor = MethodDefinition {
        key: Identifier::new("constructor", Span::default()),
        kind: MethodKind::Constructor,
        value: greet_body(),
        is_static: false,
        span: Span::default(),
    };
    let greet = MethodDefinition {
        key: Identifier::new("greet", Span::default()),
        kind: MethodKind::Method,
        ..ctor.clone()
    };
    let body = ClassBody {
        members: vec![ClassMember::Method(greet), ClassMember::Method(ctor)],
    };

    assert_eq!(body.constructor().unwrap().key.name, "constructor");
    assert_eq!(body.methods().count(), 2);
}
