//! Type definitions for IR operations.
//!
//! Opcode enums, entity ids, and calling conventions shared by every part of
//! the IR.

use derive_more::Display;

/// Index of a function inside its [`Module`](crate::Module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("@{_0}")]
pub struct FunctionId(pub(crate) u32);

/// Index of a basic block inside its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("bb{_0}")]
pub struct BlockId(pub(crate) u32);

/// Index of an instruction inside its function's instruction arena.
///
/// Ids are stable: inserting instructions never renumbers existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("%{_0}")]
pub struct InstId(pub(crate) u32);

macro_rules! impl_index {
    ($($ty:ident),*) => {
        $(impl $ty {
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        })*
    };
}

impl_index!(FunctionId, BlockId, InstId);

/// Two-operand integer operations.
///
/// All operands and the result share one type. Shifts take the value to shift
/// as operand 0 and the shift amount as operand 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::EnumIter, strum::IntoStaticStr, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Unsigned division.
    UDiv,
    /// Signed division, truncating toward zero.
    SDiv,
    /// Unsigned remainder.
    URem,
    /// Signed remainder with the sign of the dividend.
    SRem,

    /// Left shift.
    Shl,
    /// Logical (zero-filling) right shift.
    LShr,
    /// Arithmetic (sign-filling) right shift.
    AShr,

    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// Returns true for `shl`, `lshr` and `ashr`.
    pub fn is_shift(self) -> bool {
        matches!(self, Self::Shl | Self::LShr | Self::AShr)
    }

    /// Returns true if this is a bitwise operation (including shifts).
    pub fn is_bitwise(self) -> bool {
        self.is_shift() || matches!(self, Self::And | Self::Or | Self::Xor)
    }

    pub fn is_division(self) -> bool {
        matches!(self, Self::UDiv | Self::SDiv | Self::URem | Self::SRem)
    }

    /// Returns true if this operation is commutative.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul | Self::And | Self::Or | Self::Xor)
    }
}

/// Integer comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::EnumIter, strum::AsRefStr, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum IntPredicate {
    Eq,
    Ne,
    Ugt,
    Uge,
    Ult,
    Ule,
    Sgt,
    Sge,
    Slt,
    Sle,
}

/// Calling convention of a function.
///
/// `Kernel` marks an entry point the runtime can enqueue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::AsRefStr, strum::Display)]
pub enum CallingConv {
    #[default]
    #[strum(serialize = "")]
    Default,
    #[strum(serialize = "spir_kernel")]
    Kernel,
    #[strum(serialize = "spir_func")]
    SpirFunc,
}

/// Instruction opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Binary(BinaryOp),
    ICmp(IntPredicate),
    /// `select cond, true_value, false_value`.
    Select,
    /// Direct call; operands are the arguments.
    Call(FunctionId),
    /// Return; zero or one operand.
    Ret,
    Br(BlockId),
    /// Conditional branch on operand 0.
    CondBr { then_block: BlockId, else_block: BlockId },
}

impl Opcode {
    pub fn is_terminator(&self) -> bool {
        matches!(self, Self::Ret | Self::Br(_) | Self::CondBr { .. })
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Self::Binary(op) => Some(*op),
            _ => None,
        }
    }

    pub fn is_shift(&self) -> bool {
        self.binary_op().is_some_and(BinaryOp::is_shift)
    }

    /// Opcode mnemonic as printed in textual IR.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Binary(op) => op.into(),
            Self::ICmp(_) => "icmp",
            Self::Select => "select",
            Self::Call(_) => "call",
            Self::Ret => "ret",
            Self::Br(_) | Self::CondBr { .. } => "br",
        }
    }
}
