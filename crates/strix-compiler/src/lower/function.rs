//! Function body lowering
//!
//! Lowers the statement subset that can appear around class declarations:
//! literal returns, empty statements and nested classes.

use strix_types::ast::{BlockStatement, FunctionExpression, Literal, Statement};

use super::class::lower_class_declaration;
use super::project::project_id;
use super::{FunctionLowering, LowerCx};
use crate::ir::{IrBuilder, IrConstant, Register, RuntimeType};

/// Default [`FunctionLowering`] implementation
#[derive(Debug, Default)]
pub struct BodyLowerer {
    functions_lowered: usize,
}

impl BodyLowerer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of function expressions lowered so far
    pub fn functions_lowered(&self) -> usize {
        self.functions_lowered
    }

    /// Lower statements at the current insertion point
    ///
    /// Statements after a `return` are unreachable and are not lowered.
    pub fn lower_statements(&mut self, cx: &mut LowerCx<'_>, statements: &[Statement]) {
        for (index, stmt) in statements.iter().enumerate() {
            if cx.builder.is_block_terminated() {
                tracing::trace!(skipped = statements.len() - index, "dropping unreachable statements");
                break;
            }
            self.lower_statement(cx, stmt);
        }
    }

    fn lower_block(&mut self, cx: &mut LowerCx<'_>, block: &BlockStatement) {
        self.lower_statements(cx, &block.statements);
    }

    fn lower_statement(&mut self, cx: &mut LowerCx<'_>, stmt: &Statement) {
        match stmt {
            Statement::Class(decl) => lower_class_declaration(cx, self, decl),
            Statement::Return(ret) => {
                let value = ret
                    .argument
                    .as_ref()
                    .map(lower_literal)
                    .unwrap_or_else(IrBuilder::literal_undefined);
                cx.builder.create_return(value.into());
            }
            Statement::Empty(_) => {}
        }
    }

    /// Terminate a body that falls off its end with `return undefined`
    pub fn finish_body(&mut self, cx: &mut LowerCx<'_>) {
        if !cx.builder.is_block_terminated() {
            cx.builder
                .create_return(IrBuilder::literal_undefined().into());
        }
    }
}

impl FunctionLowering for BodyLowerer {
    fn lower_function_expression(
        &mut self,
        cx: &mut LowerCx<'_>,
        func: &FunctionExpression,
        name: Option<&str>,
    ) -> Register {
        let name = name.or_else(|| func.id.as_ref().map(|id| id.name.as_str()));

        let func_id = {
            let mut scope = cx.save_restore();
            let types = scope.types;

            let return_ty = func
                .return_type
                .map(|ty| project_id(types, ty))
                .unwrap_or(RuntimeType::UNKNOWN);
            let func_id = scope.enter_function(name, return_ty);
            scope.builder.set_source_span(func_id, func.span);

            for param in &func.params {
                let ty = param
                    .ty
                    .map(|ty| project_id(types, ty))
                    .unwrap_or(RuntimeType::UNKNOWN);
                scope.builder.add_param(func_id, ty);
            }

            self.lower_block(&mut scope, &func.body);
            self.finish_body(&mut scope);
            func_id
        };

        self.functions_lowered += 1;
        tracing::trace!(function = %func_id, name = name.unwrap_or("<anonymous>"), "lowered function body");
        cx.builder.create_create_function(func_id)
    }
}

fn lower_literal(lit: &Literal) -> IrConstant {
    match lit {
        Literal::Undefined => IrBuilder::literal_undefined(),
        Literal::Null => IrBuilder::literal_null(),
        Literal::Boolean(b) => IrBuilder::literal_bool(*b),
        Literal::Number(n) => IrBuilder::literal_number(*n),
        Literal::String(s) => IrBuilder::literal_string(s.as_str()),
        Literal::BigInt(digits) => IrConstant::BigInt(digits.clone()),
    }
}
