//! IR Builder
//!
//! Append-only construction of an [`IrModule`]. The builder keeps one
//! insertion point (function + block); every `create_*` instruction method
//! appends at that point. Code that redirects the insertion point to build
//! another function does so through a [`SaveRestore`] guard, which puts the
//! previous point back when it goes out of scope, on every exit path.

use std::ops::{Deref, DerefMut};
use strix_types::Span;

use super::block::{BasicBlockId, Terminator};
use super::function::IrFunction;
use super::instr::{BuiltinMethod, FunctionId, IrInstr, VariableId};
use super::module::{IrModule, IrVariable};
use super::types::RuntimeType;
use super::value::{IrConstant, IrValue, Register};

/// Where new instructions are appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    pub function: FunctionId,
    pub block: BasicBlockId,
}

/// Builds IR into an owned module
#[derive(Debug)]
pub struct IrBuilder {
    module: IrModule,
    insertion: Option<InsertionPoint>,
}

impl IrBuilder {
    /// Create a builder for an empty module
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: IrModule::new(module_name),
            insertion: None,
        }
    }

    /// The module built so far
    pub fn module(&self) -> &IrModule {
        &self.module
    }

    /// Finish building and take the module
    pub fn into_module(self) -> IrModule {
        self.module
    }

    // ------------------------------------------------------------------
    // Functions, blocks and the insertion point
    // ------------------------------------------------------------------

    /// Create a new function with no blocks
    pub fn create_function(&mut self, name: Option<&str>, return_ty: RuntimeType) -> FunctionId {
        let id = self.module.add_function(IrFunction::new(name, return_ty));
        tracing::trace!(function = %id, name = name.unwrap_or("<anonymous>"), "created function");
        id
    }

    /// Add a parameter to `func`
    pub fn add_param(&mut self, func: FunctionId, ty: RuntimeType) -> Register {
        self.function_mut(func).add_param(ty)
    }

    /// Record the source span a function was lowered from
    pub fn set_source_span(&mut self, func: FunctionId, span: Span) {
        self.function_mut(func).source_span = span;
    }

    /// Append a new basic block to `func`
    pub fn create_basic_block(&mut self, func: FunctionId, label: Option<&str>) -> BasicBlockId {
        self.function_mut(func).create_block(label)
    }

    /// Direct subsequent instructions to the end of `block` in `func`
    pub fn set_insertion_block(&mut self, func: FunctionId, block: BasicBlockId) {
        debug_assert!(
            self.module
                .get_function(func)
                .and_then(|f| f.get_block(block))
                .is_some(),
            "insertion block {} does not exist in {}",
            block,
            func
        );
        self.insertion = Some(InsertionPoint {
            function: func,
            block,
        });
    }

    /// Current insertion point, if any
    pub fn insertion_point(&self) -> Option<InsertionPoint> {
        self.insertion
    }

    /// Stop appending anywhere
    pub fn clear_insertion_point(&mut self) {
        self.insertion = None;
    }

    /// Function holding the insertion point
    pub fn current_function(&self) -> Option<FunctionId> {
        self.insertion.map(|p| p.function)
    }

    /// Check if the insertion block already has a terminator
    pub fn is_block_terminated(&self) -> bool {
        let Some(point) = self.insertion else {
            return false;
        };
        self.module
            .get_function(point.function)
            .and_then(|f| f.get_block(point.block))
            .map(|b| b.is_terminated())
            .unwrap_or(false)
    }

    /// Guard that restores the current insertion point when dropped
    pub fn save_restore(&mut self) -> SaveRestore<'_, IrBuilder> {
        SaveRestore::new(self)
    }

    /// Create the storage location for a binding in the current function
    pub fn declare_variable(&mut self, name: impl Into<String>) -> VariableId {
        let owner = self
            .current_function()
            .expect("declare_variable needs an insertion point");
        self.module.add_variable(IrVariable {
            name: name.into(),
            owner,
        })
    }

    fn function_mut(&mut self, func: FunctionId) -> &mut IrFunction {
        self.module
            .get_function_mut(func)
            .expect("Function not found")
    }

    fn current_function_mut(&mut self) -> &mut IrFunction {
        let point = self.insertion.expect("No insertion point");
        self.function_mut(point.function)
    }

    fn alloc_register(&mut self, ty: RuntimeType) -> Register {
        self.current_function_mut().alloc_register(ty)
    }

    fn emit(&mut self, instr: IrInstr) {
        let point = self.insertion.expect("No insertion point");
        let block = self
            .function_mut(point.function)
            .get_block_mut(point.block)
            .expect("Insertion block not found");
        debug_assert!(!block.is_terminated(), "emitting into terminated block {}", block.id);
        block.add_instr(instr);
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    pub fn literal_undefined() -> IrConstant {
        IrConstant::Undefined
    }

    pub fn literal_null() -> IrConstant {
        IrConstant::Null
    }

    pub fn literal_bool(value: bool) -> IrConstant {
        IrConstant::Boolean(value)
    }

    pub fn literal_string(value: impl Into<String>) -> IrConstant {
        IrConstant::String(value.into())
    }

    pub fn literal_number(value: f64) -> IrConstant {
        IrConstant::Number(value)
    }

    pub fn literal_positive_zero() -> IrConstant {
        IrConstant::Number(0.0)
    }

    pub fn literal_bigint_zero() -> IrConstant {
        IrConstant::BigInt("0".to_string())
    }

    // ------------------------------------------------------------------
    // Instructions
    // ------------------------------------------------------------------

    /// `dest = {}` with room for `size_hint` properties and an optional prototype
    pub fn create_alloc_object(&mut self, size_hint: u32, parent: Option<IrValue>) -> Register {
        let dest = self.alloc_register(RuntimeType::OBJECT);
        self.emit(IrInstr::AllocObject {
            dest,
            size_hint,
            parent,
        });
        dest
    }

    /// `dest = { k: v, ... }` in one allocation
    pub fn create_alloc_object_literal(&mut self, properties: Vec<(String, IrValue)>) -> Register {
        let dest = self.alloc_register(RuntimeType::OBJECT);
        self.emit(IrInstr::AllocObjectLiteral { dest, properties });
        dest
    }

    /// `dest = closure(func)`
    pub fn create_create_function(&mut self, func: FunctionId) -> Register {
        let dest = self.alloc_register(RuntimeType::CLOSURE);
        self.emit(IrInstr::CreateFunction { dest, func });
        dest
    }

    /// `object[property] = value`, overwriting even non-configurable slots
    pub fn create_store_property_strict(
        &mut self,
        value: IrValue,
        object: IrValue,
        property: impl Into<String>,
    ) {
        self.emit(IrInstr::StorePropertyStrict {
            object,
            property: property.into(),
            value,
        });
    }

    /// Define a property not yet present on `object`
    pub fn create_store_new_own_property(
        &mut self,
        value: IrValue,
        object: IrValue,
        property: impl Into<String>,
    ) {
        self.emit(IrInstr::StoreNewOwnProperty {
            object,
            property: property.into(),
            value,
        });
    }

    /// Store into a binding's storage; `declaring` marks its initializing store
    pub fn create_store_variable(&mut self, value: IrValue, variable: VariableId, declaring: bool) {
        self.emit(IrInstr::StoreVariable {
            variable,
            value,
            declaring,
        });
    }

    /// Call a runtime builtin for its effect
    pub fn create_call_builtin(&mut self, builtin: BuiltinMethod, args: Vec<IrValue>) {
        debug_assert_eq!(args.len(), builtin.arity(), "wrong arity for {}", builtin);
        self.emit(IrInstr::CallBuiltin {
            dest: None,
            builtin,
            args,
        });
    }

    /// Terminate the insertion block with `return value`
    pub fn create_return(&mut self, value: IrValue) {
        let point = self.insertion.expect("No insertion point");
        self.function_mut(point.function)
            .get_block_mut(point.block)
            .expect("Insertion block not found")
            .set_terminator(Terminator::Return(value));
    }
}

/// Anything that can hand out the builder whose insertion point is guarded
pub trait InsertionHost {
    fn ir_builder(&mut self) -> &mut IrBuilder;
}

impl InsertionHost for IrBuilder {
    fn ir_builder(&mut self) -> &mut IrBuilder {
        self
    }
}

/// Scoped save/restore of the builder insertion point
///
/// Derefs to the guarded host, so work inside the scope goes through the
/// guard. Dropping the guard restores the saved point.
pub struct SaveRestore<'a, H: InsertionHost + ?Sized> {
    host: &'a mut H,
    saved: Option<InsertionPoint>,
}

impl<'a, H: InsertionHost + ?Sized> SaveRestore<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        let saved = host.ir_builder().insertion;
        Self { host, saved }
    }
}

impl<H: InsertionHost + ?Sized> Deref for SaveRestore<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: InsertionHost + ?Sized> DerefMut for SaveRestore<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: InsertionHost + ?Sized> Drop for SaveRestore<'_, H> {
    fn drop(&mut self) {
        self.host.ir_builder().insertion = self.saved;
    }
}
