use ember_ir::{Module, verify_function};
use snafu::ResultExt;

use crate::error::{Result, VerifyFailedSnafu};
use crate::pass::{ModulePass, PreservedAnalyses};

/// Verifies every function definition; fails on the first invalid one.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifierPass;

impl VerifierPass {
    pub const NAME: &'static str = "verify";
}

impl ModulePass for VerifierPass {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, m: &mut Module) -> Result<PreservedAnalyses> {
        verify_module(m, Self::NAME)?;
        Ok(PreservedAnalyses::all())
    }
}

/// Verifies `m`, attributing failures to `pass`.
pub(crate) fn verify_module(m: &Module, pass: &str) -> Result<()> {
    for (_, f) in m.functions().filter(|(_, f)| !f.is_declaration()) {
        verify_function(f).context(VerifyFailedSnafu { pass })?;
    }
    Ok(())
}
