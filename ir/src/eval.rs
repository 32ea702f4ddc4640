//! Reference interpreter for integer kernels.
//!
//! Executes a function over scalar and fixed-vector integer arguments. It
//! models the target machine rather than the source language: a native shift
//! whose amount is not below the element width is reported as
//! [`Error::ShiftOutOfRange`](crate::Error::ShiftOutOfRange) instead of
//! producing a value.
//!
//! # Semantics
//!
//! - Integer arithmetic wraps at the element width
//! - Signed operations sign-extend from the element width
//! - Division by zero is an error
//! - Calls and scalable vectors are not supported

use std::collections::HashMap;

use ember_dtype::{DType, ScalarDType};
use smallvec::SmallVec;
use snafu::{OptionExt, ensure};

use crate::error::*;
use crate::{BinaryOp, Constant, Function, InstId, IntPredicate, Opcode, Value};

const STEP_LIMIT: usize = 1 << 20;

/// A runtime integer value: one lane for scalars, `count` lanes for vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalValue {
    pub scalar: ScalarDType,
    pub lanes: SmallVec<[u64; 4]>,
    pub is_vector: bool,
}

impl EvalValue {
    pub fn scalar(scalar: ScalarDType, value: u64) -> Self {
        Self { scalar, lanes: SmallVec::from_elem(value & scalar.mask(), 1), is_vector: false }
    }

    pub fn vector(scalar: ScalarDType, lanes: impl IntoIterator<Item = u64>) -> Self {
        Self { scalar, lanes: lanes.into_iter().map(|v| v & scalar.mask()).collect(), is_vector: true }
    }

    pub fn from_constant(c: &Constant) -> Result<Self> {
        let ty = c.dtype();
        let scalar = ty.element().filter(ScalarDType::is_int).context(EvalUnsupportedSnafu { what: format!("{ty}") })?;
        let lanes = c.int_lanes().context(EvalUnsupportedSnafu { what: format!("constant of type {ty}") })?;
        Ok(if ty.is_vector() { Self::vector(scalar, lanes) } else { Self::scalar(scalar, lanes[0]) })
    }

    pub fn dtype(&self) -> DType {
        if self.is_vector {
            DType::Vector { scalar: self.scalar, count: self.lanes.len() as u32 }
        } else {
            DType::Scalar(self.scalar)
        }
    }

    /// First lane, i.e. the value of a scalar.
    pub fn first(&self) -> u64 {
        self.lanes.first().copied().unwrap_or_default()
    }

    fn map2(&self, other: &Self, scalar: ScalarDType, f: impl Fn(u64, u64) -> Result<u64>) -> Result<Self> {
        ensure!(
            self.lanes.len() == other.lanes.len(),
            DTypeMismatchSnafu { lhs: self.dtype(), rhs: other.dtype() }
        );
        let lanes = self.lanes.iter().zip(&other.lanes).map(|(&a, &b)| f(a, b)).collect::<Result<SmallVec<[u64; 4]>>>()?;
        Ok(Self { scalar, lanes: lanes.into_iter().map(|v| v & scalar.mask()).collect(), is_vector: self.is_vector })
    }
}

fn sext(value: u64, bits: u32) -> i64 {
    if bits == 0 || bits >= 64 {
        return value as i64;
    }
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Evaluates a binary operation lane by lane.
pub fn eval_binary_op(op: BinaryOp, a: &EvalValue, b: &EvalValue) -> Result<EvalValue> {
    let width = a.scalar.bits();
    let shift_amount = |amount: u64| -> Result<u32> {
        ensure!(amount < u64::from(width), ShiftOutOfRangeSnafu { amount, width });
        Ok(amount as u32)
    };
    a.map2(b, a.scalar, |x, y| {
        Ok(match op {
            BinaryOp::Add => x.wrapping_add(y),
            BinaryOp::Sub => x.wrapping_sub(y),
            BinaryOp::Mul => x.wrapping_mul(y),
            BinaryOp::UDiv => {
                ensure!(y != 0, DivisionByZeroSnafu);
                x / y
            }
            BinaryOp::URem => {
                ensure!(y != 0, DivisionByZeroSnafu);
                x % y
            }
            BinaryOp::SDiv => {
                ensure!(y != 0, DivisionByZeroSnafu);
                sext(x, width).wrapping_div(sext(y, width)) as u64
            }
            BinaryOp::SRem => {
                ensure!(y != 0, DivisionByZeroSnafu);
                sext(x, width).wrapping_rem(sext(y, width)) as u64
            }
            BinaryOp::Shl => x << shift_amount(y)?,
            BinaryOp::LShr => x >> shift_amount(y)?,
            BinaryOp::AShr => (sext(x, width) >> shift_amount(y)?) as u64,
            BinaryOp::And => x & y,
            BinaryOp::Or => x | y,
            BinaryOp::Xor => x ^ y,
        })
    })
}

fn eval_icmp(pred: IntPredicate, a: &EvalValue, b: &EvalValue) -> Result<EvalValue> {
    let width = a.scalar.bits();
    a.map2(b, ScalarDType::I1, |x, y| {
        let (sx, sy) = (sext(x, width), sext(y, width));
        Ok(u64::from(match pred {
            IntPredicate::Eq => x == y,
            IntPredicate::Ne => x != y,
            IntPredicate::Ugt => x > y,
            IntPredicate::Uge => x >= y,
            IntPredicate::Ult => x < y,
            IntPredicate::Ule => x <= y,
            IntPredicate::Sgt => sx > sy,
            IntPredicate::Sge => sx >= sy,
            IntPredicate::Slt => sx < sy,
            IntPredicate::Sle => sx <= sy,
        }))
    })
}

fn eval_select(cond: &EvalValue, t: &EvalValue, f: &EvalValue) -> Result<EvalValue> {
    if !cond.is_vector {
        return Ok(if cond.first() != 0 { t.clone() } else { f.clone() });
    }
    let picked = cond.map2(t, t.scalar, |c, x| Ok(if c != 0 { x } else { 0 }))?;
    let other = cond.map2(f, f.scalar, |c, y| Ok(if c != 0 { 0 } else { y }))?;
    picked.map2(&other, t.scalar, |x, y| Ok(x | y))
}

fn operand(env: &HashMap<InstId, EvalValue>, args: &[EvalValue], v: &Value) -> Result<EvalValue> {
    match v {
        Value::Inst(id) => env.get(id).cloned().context(EvalUnsupportedSnafu { what: format!("use of {id} before definition") }),
        Value::Arg(index) => args.get(*index as usize).cloned().context(UnknownArgumentSnafu { index: *index }),
        Value::Const(c) => EvalValue::from_constant(c),
    }
}

/// Runs `func` on `args` and returns the value passed to `ret`, if any.
pub fn interpret(func: &Function, args: &[EvalValue]) -> Result<Option<EvalValue>> {
    ensure!(
        args.len() == func.params().len(),
        ArgumentCountMismatchSnafu { expected: func.params().len(), got: args.len() }
    );
    let mut block = func.entry_block().context(EvalUnsupportedSnafu { what: "function declarations" })?;
    let mut env = HashMap::new();
    let mut steps = 0usize;

    loop {
        let mut next = None;
        for &id in func.blocks[block.index()].insts() {
            steps += 1;
            ensure!(steps <= STEP_LIMIT, StepLimitExceededSnafu { limit: STEP_LIMIT });

            let inst = &func.insts[id.index()];
            let ops = inst.operands();
            let op = |index: usize| -> Result<EvalValue> {
                let v = ops.get(index).context(OperandIndexOutOfBoundsSnafu { index, count: ops.len() })?;
                operand(&env, args, v)
            };
            let result = match inst.opcode() {
                Opcode::Binary(bop) => eval_binary_op(bop, &op(0)?, &op(1)?)?,
                Opcode::ICmp(pred) => eval_icmp(pred, &op(0)?, &op(1)?)?,
                Opcode::Select => eval_select(&op(0)?, &op(1)?, &op(2)?)?,
                Opcode::Call(callee) => {
                    return EvalUnsupportedSnafu { what: format!("call to {callee}") }.fail();
                }
                Opcode::Ret if ops.is_empty() => return Ok(None),
                Opcode::Ret => return op(0).map(Some),
                Opcode::Br(target) => {
                    next = Some(target);
                    break;
                }
                Opcode::CondBr { then_block, else_block } => {
                    next = Some(if op(0)?.first() != 0 { then_block } else { else_block });
                    break;
                }
            };
            env.insert(id, result);
        }
        block = next.context(MissingTerminatorSnafu { block })?;
    }
}
