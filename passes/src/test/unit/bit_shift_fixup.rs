use ember_ir::{BinaryOp, Builder, Constant, DType, Function, InstId, Opcode, ScalarDType, Value, verify_function};
use test_case::test_case;

use crate::{BitShiftFixupPass, FunctionPass, PreservedAnalyses};

/// `ret (arg0 <op> amount)` where `amount` is built from the builder.
fn shift_fn(ty: DType, op: BinaryOp, amount: impl FnOnce(&mut Builder<'_>) -> Value) -> (Function, InstId) {
    let mut f = Function::new("f", [ty.clone(), ty.clone()], ty);
    let entry = f.add_block("entry");
    let mut b = Builder::at_end(&mut f, entry);
    let amount = amount(&mut b);
    let shift = b.binary(op, Value::Arg(0), amount).unwrap();
    b.ret(Some(shift.clone())).unwrap();
    (f, shift.as_inst().unwrap())
}

fn int(ty: &DType, value: u64) -> Value {
    Value::Const(Constant::int_for(ty, value).unwrap())
}

#[test]
fn variable_amount_gains_mask() {
    let (mut f, shl) = shift_fn(DType::I32, BinaryOp::Shl, |_| Value::Arg(1));
    let before = f.num_instructions();

    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::cfg());
    assert_eq!(f.num_instructions(), before + 1);

    let (block, position) = f.position_of(shl).unwrap();
    let mask_id = f.block(block).unwrap().insts()[position - 1];
    let mask = f.inst(mask_id).unwrap();
    assert_eq!(mask.opcode(), Opcode::Binary(BinaryOp::And));
    assert_eq!(mask.operands(), &[Value::Arg(1), int(&DType::I32, 31)]);
    assert_eq!(f.inst(shl).unwrap().operand(1), Some(&Value::Inst(mask_id)));
    assert_eq!(f.inst(shl).unwrap().operand(0), Some(&Value::Arg(0)));
    verify_function(&f).unwrap();
}

#[test_case(BinaryOp::Shl, 0; "shl by zero")]
#[test_case(BinaryOp::LShr, 5; "lshr by five")]
#[test_case(BinaryOp::AShr, 31; "ashr by width minus one")]
fn in_range_constant_is_unchanged(op: BinaryOp, amount: u64) {
    let (mut f, _) = shift_fn(DType::I32, op, |_| int(&DType::I32, amount));
    let original = f.clone();
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::all());
    assert_eq!(f, original);
}

#[test_case(DType::I8, 8; "i8 by width")]
#[test_case(DType::I16, 100; "i16 far out of range")]
#[test_case(DType::I64, 64; "i64 by width")]
fn out_of_range_constant_is_masked(ty: DType, amount: u64) {
    let (mut f, shl) = shift_fn(ty.clone(), BinaryOp::Shl, |_| int(&ty, amount));
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::cfg());
    let Some(Value::Inst(mask)) = f.inst(shl).unwrap().operand(1).cloned() else {
        panic!("shift amount was not replaced");
    };
    assert_eq!(f.inst(mask).unwrap().operand(1), Some(&int(&ty, u64::from(ty.scalar_bits()) - 1)));
}

#[test]
fn masked_amount_is_unchanged() {
    let ty = DType::I16;
    let (mut f, _) = shift_fn(ty.clone(), BinaryOp::LShr, |b| b.and(Value::Arg(1), int(&ty, 15)).unwrap());
    let original = f.clone();
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::all());
    assert_eq!(f, original);
}

#[test]
fn mask_with_other_constant_is_masked_again() {
    let ty = DType::I16;
    let (mut f, _) = shift_fn(ty.clone(), BinaryOp::LShr, |b| b.and(Value::Arg(1), int(&ty, 31)).unwrap());
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::cfg());
}

#[test]
fn mask_in_first_operand_is_not_recognised() {
    let ty = DType::I32;
    let (mut f, _) = shift_fn(ty.clone(), BinaryOp::Shl, |b| b.and(int(&ty, 31), Value::Arg(1)).unwrap());
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::cfg());
}

#[test]
fn pass_is_idempotent() {
    let (mut f, _) = shift_fn(DType::I64, BinaryOp::AShr, |_| Value::Arg(1));
    BitShiftFixupPass.run(&mut f);
    let once = f.clone();
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::all());
    assert_eq!(f, once);
}

#[test]
fn vector_shift_uses_element_width_and_splat() {
    let ty = DType::I8.vec(4).unwrap();
    let (mut f, shl) = shift_fn(ty.clone(), BinaryOp::Shl, |_| Value::Arg(1));
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::cfg());

    let Some(Value::Inst(mask)) = f.inst(shl).unwrap().operand(1).cloned() else {
        panic!("shift amount was not replaced");
    };
    let mask_const = f.inst(mask).unwrap().operand(1).and_then(Value::as_const).unwrap();
    assert_eq!(mask_const.dtype(), ty);
    assert_eq!(mask_const.splat_value().and_then(Constant::as_int), Some(7));
    verify_function(&f).unwrap();
}

#[test_case(Constant::int_vector(ScalarDType::I8, [3, 3, 3, 3]), false; "uniform in range")]
#[test_case(Constant::int_vector(ScalarDType::I8, [3, 9, 3, 3]), true; "mixed lanes")]
#[test_case(Constant::int_vector(ScalarDType::I8, [8, 8, 8, 8]), true; "uniform out of range")]
fn vector_constant_amounts(amount: Constant, masked: bool) {
    let ty = DType::I8.vec(4).unwrap();
    let (mut f, _) = shift_fn(ty, BinaryOp::LShr, |_| Value::Const(amount));
    assert_eq!(BitShiftFixupPass.run(&mut f).is_all(), !masked);
}

#[test]
fn scalable_vector_masks_with_splat() {
    let ty = DType::I32.scalable_vec(4).unwrap();
    let (mut f, _) = shift_fn(ty.clone(), BinaryOp::Shl, |_| Value::Arg(1));
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::cfg());

    let (mut g, _) = shift_fn(ty.clone(), BinaryOp::Shl, |b| b.and(Value::Arg(1), int(&ty, 31)).unwrap());
    assert_eq!(BitShiftFixupPass.run(&mut g), PreservedAnalyses::all());
}

#[test]
fn nested_splat_constant_is_extracted() {
    let ty = DType::I32.vec(2).unwrap();
    let inner = Constant::int_for(&ty, 4).unwrap();
    let nested = Constant::Splat { ty: ty.clone(), value: Box::new(inner) };
    let (mut f, _) = shift_fn(ty, BinaryOp::Shl, |_| Value::Const(nested));
    assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::all());
}

#[test]
fn functions_without_shifts_are_untouched() {
    let mut f = Function::new("f", [DType::I32], DType::I32);
    let entry = f.add_block("entry");
    let mut b = Builder::at_end(&mut f, entry);
    let v = b.add(Value::Arg(0), Value::Arg(0)).unwrap();
    b.ret(Some(v)).unwrap();
    let original = f.clone();

    assert!(BitShiftFixupPass.run(&mut f).is_all());
    assert_eq!(f, original);

    let mut decl = Function::new("decl", [], DType::Void);
    assert!(BitShiftFixupPass.run(&mut decl).is_all());
}

#[test]
fn every_shift_in_a_chain_is_masked() {
    let ty = DType::I32;
    let mut f = Function::new("f", [ty.clone(), ty.clone()], ty);
    let entry = f.add_block("entry");
    let mut b = Builder::at_end(&mut f, entry);
    let a = b.shl(Value::Arg(0), Value::Arg(1)).unwrap();
    let c = b.lshr(a.clone(), a).unwrap();
    b.ret(Some(c)).unwrap();

    BitShiftFixupPass.run(&mut f);
    let ands = f.instructions().filter(|(_, i)| i.binary_op() == Some(BinaryOp::And)).count();
    assert_eq!(ands, 2);
    verify_function(&f).unwrap();
}
