//! Instruction builder.
//!
//! Every constructor validates operand types before touching the function,
//! so a failed build leaves the function unchanged.

use ember_dtype::DType;
use smallvec::{SmallVec, smallvec};
use snafu::{OptionExt, ensure};

use crate::error::*;
use crate::function::Instruction;
use crate::{BinaryOp, BlockId, Function, FunctionId, InstId, IntPredicate, Opcode, Value};

/// Where the builder places new instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPoint {
    /// Append to the end of the block.
    End(BlockId),
    /// Immediately before an existing instruction.
    Before(InstId),
}

pub struct Builder<'f> {
    func: &'f mut Function,
    point: InsertPoint,
}

impl<'f> Builder<'f> {
    pub fn at_end(func: &'f mut Function, block: BlockId) -> Self {
        Self { func, point: InsertPoint::End(block) }
    }

    pub fn before(func: &'f mut Function, inst: InstId) -> Self {
        Self { func, point: InsertPoint::Before(inst) }
    }

    pub fn position(&mut self, point: InsertPoint) {
        self.point = point;
    }

    pub fn function(&self) -> &Function {
        self.func
    }

    fn insert(&mut self, opcode: Opcode, ty: DType, operands: SmallVec<[Value; 3]>) -> Result<InstId> {
        let (block, position) = match self.point {
            InsertPoint::End(block) => {
                let bb = self.func.block(block).context(UnknownBlockSnafu { id: block })?;
                let terminated = bb.insts.last().is_some_and(|&last| self.func.insts[last.index()].is_terminator());
                ensure!(!terminated, BlockTerminatedSnafu { block });
                (block, bb.insts.len())
            }
            InsertPoint::Before(inst) => self.func.position_of(inst).context(UnknownInstructionSnafu { id: inst })?,
        };
        let inst = Instruction { opcode, ty, operands, name: None, block };
        Ok(self.func.insert_at(block, position, inst))
    }

    fn int_operands(&self, op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<DType> {
        let lhs_ty = self.func.value_type(lhs)?;
        let rhs_ty = self.func.value_type(rhs)?;
        ensure!(lhs_ty == rhs_ty, DTypeMismatchSnafu { lhs: lhs_ty, rhs: rhs_ty });
        ensure!(lhs_ty.is_int(), InvalidDTypeForBinaryOpSnafu { operation: op, dtype: lhs_ty });
        Ok(lhs_ty)
    }

    // =========================================================================
    // Arithmetic and bitwise
    // =========================================================================

    pub fn binary(&mut self, op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
        let ty = self.int_operands(op, &lhs, &rhs)?;
        self.insert(Opcode::Binary(op), ty, smallvec![lhs, rhs]).map(Value::Inst)
    }

    pub fn add(&mut self, lhs: Value, rhs: Value) -> Result<Value> {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn and(&mut self, lhs: Value, rhs: Value) -> Result<Value> {
        self.binary(BinaryOp::And, lhs, rhs)
    }

    pub fn shl(&mut self, value: Value, amount: Value) -> Result<Value> {
        self.binary(BinaryOp::Shl, value, amount)
    }

    pub fn lshr(&mut self, value: Value, amount: Value) -> Result<Value> {
        self.binary(BinaryOp::LShr, value, amount)
    }

    pub fn ashr(&mut self, value: Value, amount: Value) -> Result<Value> {
        self.binary(BinaryOp::AShr, value, amount)
    }

    // =========================================================================
    // Comparison and selection
    // =========================================================================

    pub fn icmp(&mut self, pred: IntPredicate, lhs: Value, rhs: Value) -> Result<Value> {
        let lhs_ty = self.func.value_type(&lhs)?;
        let rhs_ty = self.func.value_type(&rhs)?;
        ensure!(lhs_ty == rhs_ty, DTypeMismatchSnafu { lhs: lhs_ty, rhs: rhs_ty });
        ensure!(lhs_ty.is_int(), InvalidDTypeForCompareSnafu { dtype: lhs_ty });
        let ty = lhs_ty.with_scalar(ember_dtype::ScalarDType::I1);
        self.insert(Opcode::ICmp(pred), ty, smallvec![lhs, rhs]).map(Value::Inst)
    }

    pub fn select(&mut self, cond: Value, if_true: Value, if_false: Value) -> Result<Value> {
        let cond_ty = self.func.value_type(&cond)?;
        let true_ty = self.func.value_type(&if_true)?;
        let false_ty = self.func.value_type(&if_false)?;
        ensure!(true_ty == false_ty, DTypeMismatchSnafu { lhs: true_ty, rhs: false_ty });
        let valid_cond = cond_ty == DType::I1 || cond_ty == true_ty.with_scalar(ember_dtype::ScalarDType::I1);
        ensure!(valid_cond, InvalidSelectConditionSnafu { actual: cond_ty });
        self.insert(Opcode::Select, true_ty, smallvec![cond, if_true, if_false]).map(Value::Inst)
    }

    // =========================================================================
    // Calls and terminators
    // =========================================================================

    /// Direct call. The callee signature lives in the module, so only the
    /// arguments' own validity is checked here.
    pub fn call(&mut self, callee: FunctionId, ret_ty: DType, args: impl IntoIterator<Item = Value>) -> Result<Value> {
        let args: SmallVec<[Value; 3]> = args.into_iter().collect();
        for arg in &args {
            self.func.value_type(arg)?;
        }
        self.insert(Opcode::Call(callee), ret_ty, args).map(Value::Inst)
    }

    pub fn ret(&mut self, value: Option<Value>) -> Result<InstId> {
        if let Some(v) = &value {
            let actual = self.func.value_type(v)?;
            let expected = self.func.ret_ty().clone();
            ensure!(actual == expected, DTypeMismatchSnafu { lhs: expected, rhs: actual });
        }
        self.insert(Opcode::Ret, DType::Void, value.into_iter().collect())
    }

    pub fn br(&mut self, target: BlockId) -> Result<InstId> {
        self.func.block(target).context(UnknownBlockSnafu { id: target })?;
        self.insert(Opcode::Br(target), DType::Void, SmallVec::new())
    }

    pub fn cond_br(&mut self, cond: Value, then_block: BlockId, else_block: BlockId) -> Result<InstId> {
        let cond_ty = self.func.value_type(&cond)?;
        ensure!(cond_ty == DType::I1, InvalidBranchConditionSnafu { actual: cond_ty });
        self.func.block(then_block).context(UnknownBlockSnafu { id: then_block })?;
        self.func.block(else_block).context(UnknownBlockSnafu { id: else_block })?;
        self.insert(Opcode::CondBr { then_block, else_block }, DType::Void, smallvec![cond])
    }
}
