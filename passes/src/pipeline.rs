//! Text-specified pass pipelines.

use std::time::Instant;

use ember_ir::Module;
use snafu::ensure;
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{InvalidPipelineSnafu, Result};
use crate::pass::{ModulePass, PreservedAnalyses};
use crate::registry::{PASS_REGISTRY, PassRegistry};
use crate::verify::verify_module;

/// An ordered list of passes and the options to run them with.
pub struct PassPipeline {
    passes: Vec<Box<dyn ModulePass>>,
    config: PipelineConfig,
}

impl PassPipeline {
    /// Parses `"a,b,c"` against the global registry.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(&PASS_REGISTRY, text)
    }

    /// Parses `"a,b,c"` against `registry`. Whitespace around names is
    /// ignored; an empty pipeline is valid, an empty name is not.
    pub fn parse_with(registry: &PassRegistry, text: &str) -> Result<Self> {
        let mut passes = Vec::new();
        if !text.trim().is_empty() {
            for name in text.split(',').map(str::trim) {
                ensure!(!name.is_empty(), InvalidPipelineSnafu { pipeline: text, reason: "empty pass name" });
                passes.push(registry.create(name)?);
            }
        }
        Ok(Self { passes, config: PipelineConfig::default() })
    }

    /// Builds the pipeline named by `config.passes`, run with `config`.
    pub fn from_config(registry: &PassRegistry, config: PipelineConfig) -> Result<Self> {
        Ok(Self::parse_with(registry, &config.passes)?.with_config(config))
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn push(&mut self, pass: Box<dyn ModulePass>) {
        self.passes.push(pass);
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs every pass in order and returns what all of them preserved.
    pub fn run(&self, m: &mut Module) -> Result<PreservedAnalyses> {
        let mut preserved = PreservedAnalyses::all();
        for pass in &self.passes {
            if self.config.debug_passes {
                debug!(pass = pass.name(), module = m.name(), "running pass");
            }
            let start = Instant::now();
            let result = pass.run(m)?;
            if self.config.time_passes {
                debug!(pass = pass.name(), elapsed_us = start.elapsed().as_micros() as u64, "pass timing");
            }
            if self.config.debug_passes {
                debug!(pass = pass.name(), ?result, "finished pass");
            }
            if self.config.verify_each {
                verify_module(m, pass.name())?;
            }
            preserved = preserved.intersect(result);
        }
        Ok(preserved)
    }
}
