//! Named pass factories.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use snafu::OptionExt;

use crate::bit_shift_fixup::BitShiftFixupPass;
use crate::error::{Result, UnknownPassSnafu};
use crate::pass::{FunctionPassAdaptor, ModulePass};
use crate::verify::VerifierPass;

/// Creates a fresh instance of a pass.
pub type PassFactory = Arc<dyn Fn() -> Box<dyn ModulePass> + Send + Sync>;

/// Registry of passes by name.
///
/// Reads take a shared lock, so pipelines can be assembled from several
/// threads while plugins register new passes.
pub struct PassRegistry {
    factories: RwLock<HashMap<String, PassFactory>>,
}

impl PassRegistry {
    /// Create a new registry with the built-in passes registered.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(
            BitShiftFixupPass::NAME,
            Arc::new(|| -> Box<dyn ModulePass> { Box::new(FunctionPassAdaptor(BitShiftFixupPass)) }),
        );
        registry.register(VerifierPass::NAME, Arc::new(|| -> Box<dyn ModulePass> { Box::new(VerifierPass) }));
        registry
    }

    pub fn empty() -> Self {
        Self { factories: RwLock::new(HashMap::new()) }
    }

    /// Registers `factory` under `name`, replacing any previous registration.
    pub fn register(&self, name: &str, factory: PassFactory) {
        self.factories.write().insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn ModulePass>> {
        let factory = self.factories.read().get(name).cloned().context(UnknownPassSnafu { name })?;
        Ok(factory())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Writes one registered name per line.
    pub fn print_pass_names(&self, out: &mut impl io::Write) -> io::Result<()> {
        for name in self.names() {
            writeln!(out, "  {name}")?;
        }
        Ok(())
    }
}

impl Default for PassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global pass registry, with built-in passes registered on first access.
pub static PASS_REGISTRY: Lazy<PassRegistry> = Lazy::new(PassRegistry::new);
