//! Class declaration lowering
//!
//! A class declaration lowers to three things, in this order:
//!
//! 1. the constructor closure, stored into the class binding by its
//!    declaring store;
//! 2. the instance template object;
//! 3. a strict store of the template into the constructor's `prototype`
//!    slot, which every closure is created with.
//!
//! A class the checker left untyped, or whose binding does not carry a
//! constructor type, is reported and skipped; nothing is emitted for it
//! and lowering moves on to the next statement.

use strix_types::ast::ClassDecl;
use strix_types::{ClassType, StaticType, TypeContext};

use super::shape::build_instance_template;
use super::{FunctionLowering, LowerCx};
use crate::diagnostic::Diagnostic;
use crate::ir::{IrBuilder, Register, RuntimeType};

/// Lower one class declaration at the current insertion point
pub fn lower_class_declaration(
    cx: &mut LowerCx<'_>,
    functions: &mut dyn FunctionLowering,
    decl: &ClassDecl,
) {
    let types = cx.types;
    let name = decl.id.name.as_str();

    let Some(class) = resolve_class_type(types, decl) else {
        tracing::warn!(class = name, "skipping class without a static type");
        let file_id = cx.diagnostics.file_id();
        cx.diagnostics
            .report(Diagnostic::untyped_class(file_id, decl.span, name));
        return;
    };

    debug_assert!(
        decl.super_class.is_none(),
        "class '{}' has a superclass after type checking",
        name
    );

    let constructor = emit_constructor(cx, functions, decl, class);

    let binding = cx.binding_for(decl.decl, name);
    cx.builder
        .create_store_variable(constructor.into(), binding, true);

    let empty = ClassType::default();
    let home = class
        .home_object
        .and_then(|home| types.class_type(home))
        .unwrap_or(&empty);
    let template = build_instance_template(cx, functions, home, None);

    cx.builder
        .create_store_property_strict(template.into(), constructor.into(), "prototype");

    tracing::debug!(
        class = name,
        fields = class.fields.len(),
        methods = class.method_count(),
        template_properties = home.fields.len(),
        explicit_constructor = class.constructor_type.is_some(),
        "lowered class"
    );
}

/// The class type behind a declaration's constructor binding
fn resolve_class_type<'t>(types: &'t TypeContext, decl: &ClassDecl) -> Option<&'t ClassType> {
    let declared = types.find_declared_type(decl.decl)?;
    match types.get(declared) {
        Some(StaticType::ClassConstructor(ctor)) => types.class_type(ctor.class),
        other => {
            let kind = other.map(StaticType::kind_name).unwrap_or("<dangling>");
            tracing::debug!(class = %decl.id.name, kind, "class binding is not a constructor type");
            None
        }
    }
}

fn emit_constructor(
    cx: &mut LowerCx<'_>,
    functions: &mut dyn FunctionLowering,
    decl: &ClassDecl,
    class: &ClassType,
) -> Register {
    let name = class.name.as_deref();

    if class.constructor_type.is_some() {
        let ctor = decl.body.constructor();
        debug_assert!(
            ctor.is_some(),
            "class '{}' has a constructor type but no constructor member",
            decl.id.name
        );
        match ctor {
            Some(ctor) => return functions.lower_function_expression(cx, &ctor.value, name),
            None => {
                tracing::error!(class = %decl.id.name, "constructor member missing; synthesizing one");
            }
        }
    }

    synthesize_constructor(cx, name)
}

/// `function() { return undefined; }`
fn synthesize_constructor(cx: &mut LowerCx<'_>, name: Option<&str>) -> Register {
    let func = {
        let mut scope = cx.save_restore();
        let func = scope.enter_function(name, RuntimeType::UNDEFINED);
        scope
            .builder
            .create_return(IrBuilder::literal_undefined().into());
        func
    };
    tracing::trace!(function = %func, "synthesized constructor");
    cx.builder.create_create_function(func)
}
