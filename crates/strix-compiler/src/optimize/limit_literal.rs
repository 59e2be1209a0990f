//! Object literal splitting
//!
//! Caps the number of properties an `AllocObjectLiteral` carries. The first
//! `max` properties stay in the literal; the rest are re-emitted, in order,
//! as `StoreNewOwnProperty` right after the allocation. With a cap of zero
//! the literal becomes a plain `AllocObject` sized for every property.

use crate::ir::{BasicBlock, IrInstr, IrModule};

/// Splits object literals larger than a fixed property count
#[derive(Debug, Clone, Copy)]
pub struct LimitObjectLiteral {
    max_properties: u32,
}

impl LimitObjectLiteral {
    pub fn new(max_properties: u32) -> Self {
        Self { max_properties }
    }

    /// Rewrite every oversized literal in the module
    ///
    /// Returns the number of allocations rewritten.
    pub fn run(&self, module: &mut IrModule) -> usize {
        let mut rewritten = 0;
        for func in &mut module.functions {
            for block in &mut func.blocks {
                rewritten += self.run_on_block(block);
            }
        }
        rewritten
    }

    fn run_on_block(&self, block: &mut BasicBlock) -> usize {
        let max = self.max_properties as usize;
        if !block.instructions.iter().any(|i| is_oversized(i, max)) {
            return 0;
        }

        let mut rewritten = 0;
        let old = std::mem::take(&mut block.instructions);
        let mut out = Vec::with_capacity(old.len());

        for instr in old {
            match instr {
                IrInstr::AllocObjectLiteral {
                    dest,
                    mut properties,
                } if properties.len() > max => {
                    let rest = properties.split_off(max);
                    if properties.is_empty() {
                        out.push(IrInstr::AllocObject {
                            dest,
                            size_hint: rest.len() as u32,
                            parent: None,
                        });
                    } else {
                        out.push(IrInstr::AllocObjectLiteral { dest, properties });
                    }
                    for (property, value) in rest {
                        out.push(IrInstr::StoreNewOwnProperty {
                            object: dest.into(),
                            property,
                            value,
                        });
                    }
                    rewritten += 1;
                }
                other => out.push(other),
            }
        }

        block.instructions = out;
        rewritten
    }
}

fn is_oversized(instr: &IrInstr, max: usize) -> bool {
    matches!(instr, IrInstr::AllocObjectLiteral { properties, .. } if properties.len() > max)
}
