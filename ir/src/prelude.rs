//! Common imports for building and rewriting kernels.
//!
//! ```rust,ignore
//! use ember_ir::prelude::*;
//! ```

pub use crate::{
    BinaryOp, BlockId, Builder, CallingConv, Constant, Function, FunctionId, InstId, InsertPoint, IntPredicate,
    MdNode, Metadata, Module, Opcode, Value,
};

pub use ember_dtype::{DType, ScalarDType};
