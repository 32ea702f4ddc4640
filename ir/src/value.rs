use derive_more::Display;

use crate::{Constant, InstId};

/// An instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Value {
    /// Result of an instruction in the same function.
    #[display("{_0}")]
    Inst(InstId),
    /// Formal parameter by position.
    #[display("%arg{_0}")]
    Arg(u32),
    #[display("{}", crate::printer::ConstantDisplay(_0))]
    Const(Constant),
}

impl Value {
    pub fn as_inst(&self) -> Option<InstId> {
        match self {
            Self::Inst(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&Constant> {
        match self {
            Self::Const(c) => Some(c),
            _ => None,
        }
    }
}

impl From<InstId> for Value {
    fn from(id: InstId) -> Self {
        Self::Inst(id)
    }
}

impl From<Constant> for Value {
    fn from(c: Constant) -> Self {
        Self::Const(c)
    }
}
