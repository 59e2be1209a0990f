//! IR passes run after lowering

mod limit_literal;

pub use limit_literal::LimitObjectLiteral;

use crate::ir::IrModule;
use crate::options::LoweringOptions;

/// Runs the passes enabled by the lowering options
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    limit_literal: Option<LimitObjectLiteral>,
}

impl Optimizer {
    /// Create an optimizer with no passes
    pub fn none() -> Self {
        Self::default()
    }

    /// Create an optimizer for the passes `options` turns on
    pub fn from_options(options: &LoweringOptions) -> Self {
        Self {
            limit_literal: options.max_literal_properties.map(LimitObjectLiteral::new),
        }
    }

    /// Run all enabled passes on the module
    pub fn optimize(&self, module: &mut IrModule) -> OptStats {
        let mut stats = OptStats::default();

        if let Some(pass) = &self.limit_literal {
            stats.literals_split = pass.run(module);
            tracing::debug!(rewritten = stats.literals_split, "split oversized object literals");
        }

        stats
    }
}

/// Statistics about the passes performed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptStats {
    /// Number of object literals split into stores
    pub literals_split: usize,
}
