//! Pass infrastructure and IR transformation passes.
//!
//! Passes are named objects implementing [`FunctionPass`] or [`ModulePass`].
//! The [`PassRegistry`] maps names to factories so pipelines can be spelled
//! as text (`"bit-shift-fixup,verify"`) and assembled at runtime.
//!
//! # Passes
//!
//! - [`bit_shift_fixup`] - Masks shift amounts modulo the operand bit width
//! - [`verify`] - Structural verification as a pass

pub mod bit_shift_fixup;
pub mod config;
pub mod error;
pub mod pass;
pub mod pipeline;
pub mod registry;
pub mod verify;


pub use bit_shift_fixup::BitShiftFixupPass;
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use pass::{FunctionPass, FunctionPassAdaptor, ModulePass, PreservedAnalyses};
pub use pipeline::PassPipeline;
pub use registry::{PASS_REGISTRY, PassFactory, PassRegistry};
pub use verify::VerifierPass;
