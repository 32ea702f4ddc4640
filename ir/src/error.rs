use ember_dtype::DType;
use snafu::Snafu;

use crate::{BinaryOp, BlockId, InstId};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// DType mismatch in binary operation.
    #[snafu(display("dtype mismatch: cannot perform operation on {lhs} and {rhs}"))]
    DTypeMismatch { lhs: DType, rhs: DType },

    /// Invalid dtype for operation (e.g., shift on float).
    #[snafu(display("invalid dtype for operation: operation {operation}; dtype {dtype}"))]
    InvalidDTypeForBinaryOp { operation: BinaryOp, dtype: DType },

    /// Comparison operands must be integers.
    #[snafu(display("icmp requires integer operands, got {dtype}"))]
    InvalidDTypeForCompare { dtype: DType },

    /// Select condition must be i1 or a vector of i1 matching the operands.
    #[snafu(display("select condition must be i1 (or a matching i1 vector), got {actual}"))]
    InvalidSelectCondition { actual: DType },

    /// Branch condition must be a scalar i1.
    #[snafu(display("branch condition must be i1, got {actual}"))]
    InvalidBranchCondition { actual: DType },

    /// Operand index past the end of the operand list.
    #[snafu(display("operand index {index} out of bounds for instruction with {count} operands"))]
    OperandIndexOutOfBounds { index: usize, count: usize },

    #[snafu(display("unknown instruction {id}"))]
    UnknownInstruction { id: InstId },

    #[snafu(display("unknown block {id}"))]
    UnknownBlock { id: BlockId },

    #[snafu(display("unknown argument %arg{index}"))]
    UnknownArgument { index: u32 },

    /// Instructions cannot be appended after a terminator.
    #[snafu(display("block {block} already has a terminator"))]
    BlockTerminated { block: BlockId },

    /// Structural verification failure.
    #[snafu(display("verification of @{function} failed: {reason}"))]
    Verification { function: String, reason: String },

    // =========================================================================
    // Interpreter
    // =========================================================================
    /// Native shift by an amount the target leaves undefined.
    #[snafu(display("shift amount {amount} out of range for {width}-bit value"))]
    ShiftOutOfRange { amount: u64, width: u32 },

    #[snafu(display("division by zero"))]
    DivisionByZero,

    #[snafu(display("interpreter does not support {what}"))]
    EvalUnsupported { what: String },

    #[snafu(display("expected {expected} arguments, got {got}"))]
    ArgumentCountMismatch { expected: usize, got: usize },

    #[snafu(display("block {block} has no terminator"))]
    MissingTerminator { block: BlockId },

    #[snafu(display("interpreter exceeded {limit} steps"))]
    StepLimitExceeded { limit: usize },
}
