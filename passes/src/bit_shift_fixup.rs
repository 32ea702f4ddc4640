//! Shift amount masking.
//!
//! Source languages for compute kernels define `a << b` as shifting by
//! `b % width(a)`, while native shift instructions leave amounts at or above
//! the bit width undefined. This pass rewrites every `shl`, `lshr` and
//! `ashr` so that its amount is reduced modulo the width before the shift:
//!
//! ```text
//! %r = shl i32 %x, %n        =>   %m = and i32 %n, 31
//!                                 %r = shl i32 %x, %m
//! ```
//!
//! Vector shifts use the element width and a splatted mask. Shifts whose
//! amount is already provably in range are left alone:
//!
//! - a constant (or uniform vector constant) below the width
//! - an `and` with exactly `width - 1` as its second operand

use ember_ir::{BinaryOp, Builder, Constant, Function, InstId, Value};
use tracing::{debug, trace};

use crate::pass::{FunctionPass, PreservedAnalyses};

#[derive(Debug, Clone, Copy, Default)]
pub struct BitShiftFixupPass;

impl BitShiftFixupPass {
    pub const NAME: &'static str = "bit-shift-fixup";
}

impl FunctionPass for BitShiftFixupPass {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, f: &mut Function) -> PreservedAnalyses {
        let mut modified = false;
        for id in f.inst_ids() {
            if f.inst(id).is_some_and(|inst| inst.is_shift()) {
                modified |= fixup_shift(f, id);
            }
        }
        if modified { PreservedAnalyses::cfg() } else { PreservedAnalyses::all() }
    }
}

/// Integer value of a scalar constant, or the common lane of a uniform
/// vector constant. Splats of splats are looked through.
fn extract_integer_constant(value: &Value) -> Option<u64> {
    fn lane(c: &Constant) -> Option<u64> {
        c.as_int().or_else(|| lane(c.splat_value()?))
    }
    lane(value.as_const()?)
}

/// `amount` is `and x, (width - 1)`.
fn is_masked(f: &Function, amount: &Value, width: u32) -> bool {
    let Some(inst) = amount.as_inst().and_then(|id| f.inst(id)) else {
        return false;
    };
    inst.binary_op() == Some(BinaryOp::And)
        && inst.operand(1).and_then(extract_integer_constant) == Some(u64::from(width) - 1)
}

/// Masks the amount of shift `id` if needed. Returns whether `f` changed.
fn fixup_shift(f: &mut Function, id: InstId) -> bool {
    let Some(inst) = f.inst(id) else {
        return false;
    };
    let (Some(value), Some(amount)) = (inst.operand(0), inst.operand(1).cloned()) else {
        return false;
    };
    let Ok(value_ty) = f.value_type(value) else {
        return false;
    };
    let width = value_ty.scalar_bits();
    if width == 0 {
        return false;
    }

    if extract_integer_constant(&amount).is_some_and(|c| c < u64::from(width)) {
        trace!(function = f.name(), shift = %id, "shift amount is an in-range constant");
        return false;
    }
    if is_masked(f, &amount, width) {
        trace!(function = f.name(), shift = %id, "shift amount is already masked");
        return false;
    }

    let mask = f.value_type(&amount).ok().and_then(|ty| Constant::int_for(&ty, u64::from(width) - 1));
    let Some(mask) = mask else {
        trace!(function = f.name(), shift = %id, "shift amount is not an integer");
        return false;
    };
    let masked = match Builder::before(f, id).and(amount, Value::Const(mask)) {
        Ok(masked) => masked,
        Err(error) => {
            debug!(function = f.name(), shift = %id, %error, "cannot mask ill-typed shift");
            return false;
        }
    };
    if let Err(error) = f.set_operand(id, 1, masked) {
        // The `and` is already in the block.
        debug!(function = f.name(), shift = %id, %error, "cannot replace shift amount");
        return true;
    }
    debug!(function = f.name(), shift = %id, width, "masked shift amount");
    true
}
