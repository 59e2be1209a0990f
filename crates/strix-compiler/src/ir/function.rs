//! IR Functions
//!
//! Functions in the IR contain parameters and basic blocks.

use super::block::{BasicBlock, BasicBlockId};
use super::types::RuntimeType;
use super::value::{Register, RegisterId};
use rustc_hash::FxHashMap;
use strix_types::Span;

/// An IR function
#[derive(Debug, Clone)]
pub struct IrFunction {
    /// Function name, `None` for anonymous functions
    pub name: Option<String>,
    /// Parameter registers (with types)
    pub params: Vec<Register>,
    /// Return type
    pub return_ty: RuntimeType,
    /// Basic blocks (in order)
    pub blocks: Vec<BasicBlock>,
    /// Entry block ID
    pub entry_block: BasicBlockId,
    /// Block lookup map for fast access
    block_map: FxHashMap<BasicBlockId, usize>,
    /// Next register number
    next_register: u32,
    /// Source span of the function definition (default for synthesized functions)
    pub source_span: Span,
}

impl IrFunction {
    /// Create a new function
    pub fn new(name: Option<&str>, return_ty: RuntimeType) -> Self {
        Self {
            name: name.map(str::to_string),
            params: Vec::new(),
            return_ty,
            blocks: Vec::new(),
            entry_block: BasicBlockId(0),
            block_map: FxHashMap::default(),
            next_register: 0,
            source_span: Span::default(),
        }
    }

    /// Name for display, `<anonymous>` when unnamed
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    /// Allocate a fresh register
    pub fn alloc_register(&mut self, ty: RuntimeType) -> Register {
        let id = RegisterId::new(self.next_register);
        self.next_register += 1;
        Register::new(id, ty)
    }

    /// Add a parameter and return its register
    pub fn add_param(&mut self, ty: RuntimeType) -> Register {
        let reg = self.alloc_register(ty);
        self.params.push(reg);
        reg
    }

    /// Add a basic block and return its ID
    pub fn add_block(&mut self, block: BasicBlock) -> BasicBlockId {
        let id = block.id;
        let index = self.blocks.len();
        self.block_map.insert(id, index);
        self.blocks.push(block);
        id
    }

    /// Create and add a new empty block with the next free ID
    pub fn create_block(&mut self, label: Option<&str>) -> BasicBlockId {
        let id = BasicBlockId(self.blocks.len() as u32);
        let block = match label {
            Some(label) => BasicBlock::with_label(id, label),
            None => BasicBlock::new(id),
        };
        self.add_block(block)
    }

    /// Get a block by ID
    pub fn get_block(&self, id: BasicBlockId) -> Option<&BasicBlock> {
        self.block_map.get(&id).map(|&idx| &self.blocks[idx])
    }

    /// Get a mutable block by ID
    pub fn get_block_mut(&mut self, id: BasicBlockId) -> Option<&mut BasicBlock> {
        self.block_map
            .get(&id)
            .copied()
            .map(|idx| &mut self.blocks[idx])
    }

    /// Get the entry block
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.get_block(self.entry_block)
    }

    /// Get the number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get the number of parameters
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Iterate over all blocks
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    /// Compute the total number of instructions across all blocks
    pub fn instruction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.len()).sum()
    }

    /// Validate the function structure
    pub fn validate(&self) -> Result<(), String> {
        if self.blocks.is_empty() {
            return Err("Function has no blocks".to_string());
        }

        if self.get_block(self.entry_block).is_none() {
            return Err(format!("Entry block {} does not exist", self.entry_block));
        }

        for block in &self.blocks {
            if !block.is_terminated() {
                return Err(format!("Block {} is not terminated", block.id));
            }
        }

        Ok(())
    }
}
