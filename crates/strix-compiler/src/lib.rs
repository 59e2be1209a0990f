//! Strix Compiler - class declaration lowering
//!
//! Lowers type-checked Strix class declarations into the IR: constructor
//! closures, instance template objects and the `prototype` link between
//! them.

#![warn(rust_2018_idioms)]

pub mod diagnostic;
pub mod error;
pub mod ir;
pub mod lower;
pub mod optimize;
pub mod options;

pub use diagnostic::{Diagnostic, Diagnostics, ErrorCode};
pub use error::{CompileError, CompileResult};
pub use ir::{IrModule, PrettyPrint};
pub use lower::{Lowerer, LowerCx};
pub use optimize::{OptStats, Optimizer};
pub use options::LoweringOptions;

use strix_types::ast::Program;
use strix_types::TypeContext;

/// Result of compiling one program
#[derive(Debug)]
pub struct Compilation {
    /// The lowered (and optimized) module
    pub module: IrModule,
    /// Non-fatal problems found while lowering
    pub diagnostics: Diagnostics,
    /// What the post-lowering passes did
    pub stats: OptStats,
}

/// Main compiler entry point
pub struct Compiler<'a> {
    type_ctx: &'a TypeContext,
    options: LoweringOptions,
}

impl<'a> Compiler<'a> {
    pub fn new(type_ctx: &'a TypeContext, options: LoweringOptions) -> Self {
        Self { type_ctx, options }
    }

    pub fn options(&self) -> &LoweringOptions {
        &self.options
    }

    /// Lower `program`, run the enabled passes and validate the result
    ///
    /// Diagnostics do not fail compilation; they are returned alongside the
    /// module. A module that fails validation is an error.
    pub fn compile(&self, program: &Program, file_id: usize) -> CompileResult<Compilation> {
        let mut lowerer = Lowerer::new(self.type_ctx, &self.options, file_id);
        let mut module = lowerer.lower_program(program);
        let diagnostics = lowerer.into_diagnostics();

        if module.get_function_id(&self.options.entry_function).is_none() {
            return Err(CompileError::InternalError {
                message: format!("entry function '{}' was not created", self.options.entry_function),
            });
        }

        let stats = Optimizer::from_options(&self.options).optimize(&mut module);

        if self.options.validate {
            module
                .validate()
                .map_err(|errors| CompileError::Validation { errors })?;
        }

        tracing::trace!(ir = %module.pretty_print(), "compiled module");

        Ok(Compilation {
            module,
            diagnostics,
            stats,
        })
    }
}
