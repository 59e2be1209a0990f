//! AST to IR Lowering
//!
//! Lowers type-checked class declarations into the IR. The pieces, leaf
//! first:
//!
//! - [`project`] maps static types onto the runtime-type lattice
//! - [`default_value`] picks the initial constant of a data field
//! - [`build_instance_template`] allocates a class's shared template object
//! - [`lower_class_declaration`] emits the constructor, binds it and links
//!   the template as its `prototype`
//!
//! Function bodies are lowered through the [`FunctionLowering`] trait so
//! class lowering never depends on a particular statement lowerer.
//! [`BodyLowerer`] is the one used by [`Lowerer`].

mod class;
mod defaults;
mod function;
mod project;
mod shape;

pub use class::lower_class_declaration;
pub use defaults::{default_value, default_value_id};
pub use function::BodyLowerer;
pub use project::{project, project_id};
pub use shape::build_instance_template;

use rustc_hash::FxHashMap;
use strix_types::ast::{DeclId, FunctionExpression, Program};
use strix_types::TypeContext;

use crate::diagnostic::Diagnostics;
use crate::ir::{
    FunctionId, InsertionHost, IrBuilder, IrModule, Register, RuntimeType, SaveRestore, VariableId,
};
use crate::options::LoweringOptions;

/// Lowers a function expression into a closure value
pub trait FunctionLowering {
    /// Lower `func` into a new IR function and emit a closure for it at the
    /// current insertion point. `name` becomes the function's name.
    fn lower_function_expression(
        &mut self,
        cx: &mut LowerCx<'_>,
        func: &FunctionExpression,
        name: Option<&str>,
    ) -> Register;
}

/// Shared state for lowering one compilation unit
pub struct LowerCx<'a> {
    /// Type context for type information
    pub types: &'a TypeContext,
    /// IR under construction
    pub builder: IrBuilder,
    /// Sink for user-facing errors
    pub diagnostics: &'a mut Diagnostics,
    /// Lowering options
    pub options: &'a LoweringOptions,
    /// Storage location of each lowered binding
    bindings: FxHashMap<DeclId, VariableId>,
}

impl<'a> LowerCx<'a> {
    pub fn new(
        types: &'a TypeContext,
        options: &'a LoweringOptions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            types,
            builder: IrBuilder::new(options.module_name.clone()),
            diagnostics,
            options,
            bindings: FxHashMap::default(),
        }
    }

    /// Storage for `decl`, created in the current function on first use
    pub fn binding_for(&mut self, decl: DeclId, name: &str) -> VariableId {
        if let Some(&var) = self.bindings.get(&decl) {
            return var;
        }
        let var = self.builder.declare_variable(name);
        self.bindings.insert(decl, var);
        var
    }

    /// Storage already created for `decl`
    pub fn binding(&self, decl: DeclId) -> Option<VariableId> {
        self.bindings.get(&decl).copied()
    }

    /// Create a function with an entry block and move the insertion point there
    pub fn enter_function(&mut self, name: Option<&str>, return_ty: RuntimeType) -> FunctionId {
        let func = self.builder.create_function(name, return_ty);
        let entry = self.builder.create_basic_block(func, Some("entry"));
        self.builder.set_insertion_block(func, entry);
        func
    }

    /// Guard that restores the builder insertion point when dropped
    pub fn save_restore(&mut self) -> SaveRestore<'_, Self> {
        SaveRestore::new(self)
    }

    pub fn into_module(self) -> IrModule {
        self.builder.into_module()
    }
}

impl InsertionHost for LowerCx<'_> {
    fn ir_builder(&mut self) -> &mut IrBuilder {
        &mut self.builder
    }
}

/// Lowers whole programs into a module
pub struct Lowerer<'a> {
    types: &'a TypeContext,
    options: &'a LoweringOptions,
    diagnostics: Diagnostics,
}

impl<'a> Lowerer<'a> {
    /// Create a lowerer whose diagnostics point into `file_id`
    pub fn new(types: &'a TypeContext, options: &'a LoweringOptions, file_id: usize) -> Self {
        Self {
            types,
            options,
            diagnostics: Diagnostics::new(file_id),
        }
    }

    /// Lower top-level statements into the entry function of a new module
    ///
    /// Each declaration is lowered on its own; one that fails to lower is
    /// reported and skipped.
    pub fn lower_program(&mut self, program: &Program) -> IrModule {
        let mut cx = LowerCx::new(self.types, self.options, &mut self.diagnostics);
        let mut bodies = BodyLowerer::new();

        let entry = cx.enter_function(Some(&self.options.entry_function), RuntimeType::UNKNOWN);
        cx.builder.set_source_span(entry, program.span);
        bodies.lower_statements(&mut cx, &program.statements);
        bodies.finish_body(&mut cx);

        let module = cx.into_module();
        tracing::debug!(
            module = %module.name,
            functions = module.function_count(),
            instructions = module.total_instruction_count(),
            diagnostics = self.diagnostics.len(),
            "lowered program"
        );
        module
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Run `f` with a context positioned in a fresh `main` function
#[cfg(test)]
pub(crate) fn with_entry<R>(
    types: &TypeContext,
    f: impl FnOnce(&mut LowerCx<'_>) -> R,
) -> (R, IrModule, Diagnostics) {
    let options = LoweringOptions::default();
    let mut diagnostics = Diagnostics::new(0);
    let mut cx = LowerCx::new(types, &options, &mut diagnostics);
    cx.enter_function(Some("main"), RuntimeType::UNKNOWN);
    let result = f(&mut cx);
    if !cx.builder.is_block_terminated() {
        cx.builder.create_return(IrBuilder::literal_undefined().into());
    }
    let module = cx.into_module();
    (result, module, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strix_types::Span;

    #[test]
    fn test_binding_created_once() {
        let types = TypeContext::new();
        let ((first, second), module, _) = with_entry(&types, |cx| {
            let first = cx.binding_for(DeclId::new(1), "Point");
            let second = cx.binding_for(DeclId::new(1), "Point");
            (first, second)
        });
        assert_eq!(first, second);
        assert_eq!(module.variables.len(), 1);
        assert_eq!(module.variables[0].owner, FunctionId(0));
    }

    #[test]
    fn test_save_restore_through_context() {
        let types = TypeContext::new();
        let (_, module, _) = with_entry(&types, |cx| {
            let before = cx.builder.insertion_point();
            {
                let mut scope = cx.save_restore();
                scope.enter_function(Some("inner"), RuntimeType::UNDEFINED);
                scope
                    .builder
                    .create_return(IrBuilder::literal_undefined().into());
            }
            assert_eq!(cx.builder.insertion_point(), before);
        });
        assert_eq!(module.function_count(), 2);
        assert!(module.validate().is_ok());
    }

    #[test]
    fn test_lower_empty_program() {
        let types = TypeContext::new();
        let options = LoweringOptions::default();
        let mut lowerer = Lowerer::new(&types, &options, 0);
        let module = lowerer.lower_program(&Program {
            statements: vec![],
            span: Span::default(),
        });

        assert_eq!(module.name, "main");
        let main = module.get_function_by_name("main").unwrap();
        assert_eq!(main.block_count(), 1);
        assert!(module.validate().is_ok());
        assert!(lowerer.diagnostics().is_empty());
    }
}
