//! Pass traits and the analyses a pass leaves valid.

use ember_ir::{Function, Module};
use tracing::debug;

use crate::error::Result;

/// Which cached analyses remain valid after a pass.
///
/// Ordered from weakest to strongest guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreservedAnalyses {
    /// Nothing is preserved.
    None,
    /// Instructions changed but the control-flow graph did not.
    Cfg,
    /// The IR was not modified.
    All,
}

impl PreservedAnalyses {
    pub const fn all() -> Self {
        Self::All
    }

    pub const fn cfg() -> Self {
        Self::Cfg
    }

    pub const fn none() -> Self {
        Self::None
    }

    pub fn is_all(self) -> bool {
        self == Self::All
    }

    pub fn preserves_cfg(self) -> bool {
        self >= Self::Cfg
    }

    /// What stays valid after running two passes in sequence.
    pub fn intersect(self, other: Self) -> Self {
        self.min(other)
    }
}

/// A transformation of one function at a time.
pub trait FunctionPass: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, f: &mut Function) -> PreservedAnalyses;
}

/// A transformation or analysis over a whole module.
pub trait ModulePass: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, m: &mut Module) -> Result<PreservedAnalyses>;
}

/// Runs a [`FunctionPass`] over every function definition of a module.
#[derive(Debug, Clone, Default)]
pub struct FunctionPassAdaptor<P>(pub P);

impl<P: FunctionPass> ModulePass for FunctionPassAdaptor<P> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn run(&self, m: &mut Module) -> Result<PreservedAnalyses> {
        let mut preserved = PreservedAnalyses::all();
        for (id, f) in m.functions_mut() {
            if f.is_declaration() {
                continue;
            }
            let result = self.0.run(f);
            if !result.is_all() {
                debug!(pass = self.0.name(), function = f.name(), %id, ?result, "pass modified function");
            }
            preserved = preserved.intersect(result);
        }
        Ok(preserved)
    }
}
