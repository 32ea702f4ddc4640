//! Structural verification.

use ember_dtype::{DType, ScalarDType};

use crate::error::{Result, VerificationSnafu};
use crate::{Function, Opcode, Value};

/// Checks that `func` is well formed:
///
/// - every block is non-empty and ends in exactly one terminator
/// - every operand refers to an argument or an instruction of this function
/// - binary operands and results share one integer type
/// - comparison, select and branch operands are typed consistently
pub fn verify_function(func: &Function) -> Result<()> {
    let fail = |reason: String| VerificationSnafu { function: func.name(), reason }.fail();

    for (block_id, block) in func.blocks() {
        let Some((&last, body)) = block.insts().split_last() else {
            return fail(format!("block {} is empty", block.name()));
        };
        if !func.inst(last).is_some_and(|i| i.is_terminator()) {
            return fail(format!("block {} does not end in a terminator", block.name()));
        }
        for &id in body {
            if func.inst(id).is_none_or(|i| i.is_terminator()) {
                return fail(format!("terminator {id} in the middle of block {}", block.name()));
            }
        }

        for &id in block.insts() {
            let Some(inst) = func.inst(id) else {
                return fail(format!("block {block_id} lists unknown instruction {id}"));
            };
            if inst.block() != block_id {
                return fail(format!("{id} is listed in {block_id} but owned by {}", inst.block()));
            }

            let mut types = Vec::with_capacity(inst.operands().len());
            for operand in inst.operands() {
                match func.value_type(operand) {
                    Ok(ty) => types.push(ty),
                    Err(e) => return fail(format!("{id}: {e}")),
                }
                if let Value::Inst(def) = operand
                    && func.inst(*def).is_some_and(|d| d.ty().is_void())
                {
                    return fail(format!("{id} uses void value {def}"));
                }
            }

            match inst.opcode() {
                Opcode::Binary(op) => {
                    if types.len() != 2 {
                        return fail(format!("{id}: {op} expects 2 operands, got {}", types.len()));
                    }
                    if types[0] != types[1] || &types[0] != inst.ty() || !inst.ty().is_int() {
                        return fail(format!("{id}: {op} operands {} and {} do not match {}", types[0], types[1], inst.ty()));
                    }
                }
                Opcode::ICmp(_) => {
                    if types.len() != 2 || types[0] != types[1] || *inst.ty() != types[0].with_scalar(ScalarDType::I1) {
                        return fail(format!("{id}: malformed icmp"));
                    }
                }
                Opcode::Select => {
                    if types.len() != 3 || types[1] != types[2] || types[1] != *inst.ty() {
                        return fail(format!("{id}: malformed select"));
                    }
                }
                Opcode::Ret => {
                    let returned = types.first().cloned().unwrap_or(DType::Void);
                    if &returned != func.ret_ty() {
                        return fail(format!("{id}: returns {returned} from function returning {}", func.ret_ty()));
                    }
                }
                Opcode::CondBr { then_block, else_block } => {
                    if types.first() != Some(&DType::I1) {
                        return fail(format!("{id}: branch condition must be i1"));
                    }
                    if func.block(then_block).is_none() || func.block(else_block).is_none() {
                        return fail(format!("{id}: branch to unknown block"));
                    }
                }
                Opcode::Br(target) => {
                    if func.block(target).is_none() {
                        return fail(format!("{id}: branch to unknown block {target}"));
                    }
                }
                Opcode::Call(_) => {}
            }
        }
    }
    Ok(())
}
