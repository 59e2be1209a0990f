//! Instance template construction

use strix_types::ClassType;

use super::defaults::default_value_id;
use super::{FunctionLowering, LowerCx};
use crate::ir::{BuiltinMethod, IrValue, Register};

/// Allocate the object shared by every instance of `class`
///
/// Fields are visited in declaration order: methods become closures named
/// after the field, data fields get their type's default. An empty class
/// gets a bare object that takes `parent` directly. Otherwise the object is
/// allocated from the whole property list in one instruction and `parent`,
/// if given, is linked afterwards with `silentSetPrototypeOf`.
pub fn build_instance_template(
    cx: &mut LowerCx<'_>,
    functions: &mut dyn FunctionLowering,
    class: &ClassType,
    parent: Option<IrValue>,
) -> Register {
    let mut properties: Vec<(String, IrValue)> = Vec::with_capacity(class.fields.len());

    for field in &class.fields {
        let value = match &field.method {
            Some(body) => functions
                .lower_function_expression(cx, body, Some(&field.name))
                .into(),
            None => default_value_id(cx.types, field.ty).into(),
        };
        properties.push((field.name.clone(), value));
    }

    if properties.is_empty() {
        let object = cx.builder.create_alloc_object(0, parent);
        tracing::trace!(object = %object, "allocated empty instance template");
        return object;
    }

    let count = properties.len();
    let object = cx.builder.create_alloc_object_literal(properties);
    tracing::trace!(object = %object, properties = count, "allocated instance template");

    if let Some(parent) = parent {
        cx.builder
            .create_call_builtin(BuiltinMethod::SilentSetPrototypeOf, vec![object.into(), parent]);
    }

    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IrConstant, IrInstr, RuntimeType};
    use crate::lower::{with_entry, BodyLowerer};
    use std::sync::Arc;
    use strix_types::ast::FunctionExpression;
    use strix_types::{Field, Span, TypeContext, TypeId};

    fn empty_method() -> Arc<FunctionExpression> {
        Arc::new(FunctionExpression::new(vec![], vec![], Span::default()))
    }

    fn main_instructions(module: &crate::ir::IrModule) -> &[IrInstr] {
        &module.get_function_by_name("main").unwrap().blocks[0].instructions
    }

    #[test]
    fn test_empty_class_allocates_bare_object() {
        let types = TypeContext::new();
        let class = ClassType::new(Some("Empty"));
        let (object, module, _) = with_entry(&types, |cx| {
            build_instance_template(cx, &mut BodyLowerer::new(), &class, None)
        });

        assert_eq!(object.ty, RuntimeType::OBJECT);
        assert_eq!(
            main_instructions(&module),
            &[IrInstr::AllocObject {
                dest: object,
                size_hint: 0,
                parent: None,
            }]
        );
    }

    #[test]
    fn test_empty_class_passes_parent_to_allocation() {
        let types = TypeContext::new();
        let class = ClassType::new(None);
        let ((parent, object), module, _) = with_entry(&types, |cx| {
            let parent = cx.builder.create_alloc_object(0, None);
            let object =
                build_instance_template(cx, &mut BodyLowerer::new(), &class, Some(parent.into()));
            (parent, object)
        });

        let instrs = main_instructions(&module);
        assert_eq!(instrs.len(), 2);
        assert_eq!(
            instrs[1],
            IrInstr::AllocObject {
                dest: object,
                size_hint: 0,
                parent: Some(parent.into()),
            }
        );
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let mut types = TypeContext::new();
        let nullable = types.union(vec![TypeId::NULL, TypeId::STRING]).unwrap();
        let class = ClassType::new(Some("Row"))
            .with_field(Field::data("id", TypeId::NUMBER))
            .with_field(Field::method("render", TypeId::ANY, empty_method()))
            .with_field(Field::data("label", nullable))
            .with_field(Field::data("done", TypeId::BOOLEAN));

        let (object, module, _) = with_entry(&types, |cx| {
            build_instance_template(cx, &mut BodyLowerer::new(), &class, None)
        });

        let instrs = main_instructions(&module);
        assert!(matches!(instrs[0], IrInstr::CreateFunction { .. }));
        let IrInstr::AllocObjectLiteral { dest, properties } = &instrs[1] else {
            panic!("expected object literal, got {:?}", instrs[1]);
        };
        assert_eq!(*dest, object);

        let keys: Vec<&str> = properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["id", "render", "label", "done"]);
        assert_eq!(properties[0].1, IrValue::from(IrConstant::Number(0.0)));
        assert_eq!(properties[1].1.runtime_type(), RuntimeType::CLOSURE);
        assert_eq!(properties[2].1, IrValue::from(IrConstant::Null));
        assert_eq!(properties[3].1, IrValue::from(IrConstant::Boolean(false)));
    }

    #[test]
    fn test_method_closure_named_after_field() {
        let types = TypeContext::new();
        let class = ClassType::new(Some("Greeter"))
            .with_field(Field::method("greet", TypeId::ANY, empty_method()));

        let (_, module, _) = with_entry(&types, |cx| {
            build_instance_template(cx, &mut BodyLowerer::new(), &class, None)
        });

        let greet = module.get_function_by_name("greet").unwrap();
        assert_eq!(greet.param_count(), 0);
        assert!(greet.validate().is_ok());
    }

    #[test]
    fn test_parent_linked_after_literal() {
        let types = TypeContext::new();
        let class = ClassType::new(Some("P")).with_field(Field::data("x", TypeId::NUMBER));

        let ((parent, object), module, _) = with_entry(&types, |cx| {
            let parent = cx.builder.create_alloc_object(0, None);
            let object =
                build_instance_template(cx, &mut BodyLowerer::new(), &class, Some(parent.into()));
            (parent, object)
        });

        let instrs = main_instructions(&module);
        assert_eq!(instrs.len(), 3);
        assert!(matches!(instrs[1], IrInstr::AllocObjectLiteral { .. }));
        assert_eq!(
            instrs[2],
            IrInstr::CallBuiltin {
                dest: None,
                builtin: BuiltinMethod::SilentSetPrototypeOf,
                args: vec![object.into(), parent.into()],
            }
        );
    }

    #[test]
    fn test_no_parent_no_prototype_call() {
        let types = TypeContext::new();
        let class = ClassType::new(Some("P")).with_field(Field::data("s", TypeId::STRING));

        let (_, module, _) = with_entry(&types, |cx| {
            build_instance_template(cx, &mut BodyLowerer::new(), &class, None)
        });

        assert!(!main_instructions(&module)
            .iter()
            .any(|i| matches!(i, IrInstr::CallBuiltin { .. })));
    }
}
