//! Intermediate Representation (IR) for the Ember kernel compiler.
//!
//! Kernels are functions made of basic blocks of typed instructions. Passes
//! rewrite instructions in place and communicate through structured metadata
//! attached to functions and modules.
//!
//! # Module Organization
//!
//! - [`types`] - Entity ids, opcodes and calling conventions
//! - [`constant`] - Compile-time constants, including splats
//! - [`function`] - Functions, blocks and instructions
//! - [`builder`] - Type-checked instruction construction
//! - [`metadata`] - Metadata nodes, function attachments, module named metadata
//! - [`eval`] - Reference interpreter used to check rewrites
//! - [`verify`] - Structural verifier
//! - [`printer`] - Textual dump
//! - [`error`] - Error types and result handling

pub mod builder;
pub mod constant;
pub mod error;
pub mod eval;
pub mod function;
pub mod metadata;
pub mod module;
pub mod prelude;
pub mod printer;
pub mod types;
pub mod value;
pub mod verify;

#[cfg(any(test, feature = "proptest"))]
pub mod test;

pub use builder::{Builder, InsertPoint};
pub use constant::Constant;
pub use error::{Error, Result};
pub use eval::{EvalValue, interpret};
pub use function::{BasicBlock, Function, Instruction, Param};
pub use metadata::{MdNode, Metadata, MetadataAttachments, NamedMetadata};
pub use module::Module;
pub use types::{BinaryOp, BlockId, CallingConv, FunctionId, InstId, IntPredicate, Opcode};
pub use value::Value;
pub use verify::verify_function;

// Re-export external types for convenience
pub use ember_dtype::{DType, ScalarDType};
