//! The fixed-up kernel agrees with a shift by `amount % width` on every input.

use ember_ir::test::property::generators::{AmountShape, ShiftCase, eval_value, shift_case};
use ember_ir::{EvalValue, eval::eval_binary_op, interpret, verify_function};
use proptest::prelude::*;

use crate::{BitShiftFixupPass, FunctionPass, PreservedAnalyses};

/// Shift with the amount reduced modulo the element width.
fn reference(case: &ShiftCase, value: &EvalValue, amount: &EvalValue) -> EvalValue {
    let width = u64::from(case.width());
    let effective = match &case.amount {
        AmountShape::Variable | AmountShape::Masked => amount.lanes.iter().map(|a| a % width).collect(),
        AmountShape::InRange(c) | AmountShape::OutOfRange(c) => vec![c % width; amount.lanes.len()],
        AmountShape::MaskedWith(m) => amount.lanes.iter().map(|a| (a & m) % width).collect::<Vec<_>>(),
    };
    let effective = if amount.is_vector {
        EvalValue::vector(amount.scalar, effective)
    } else {
        EvalValue::scalar(amount.scalar, effective[0])
    };
    eval_binary_op(case.op, value, &effective).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn fixed_shift_is_modular(
        (case, value, amount) in shift_case().prop_flat_map(|c| {
            let dtype = c.dtype.clone();
            (Just(c), eval_value(dtype.clone()), eval_value(dtype))
        })
    ) {
        let mut f = case.build().unwrap();
        BitShiftFixupPass.run(&mut f);
        verify_function(&f).unwrap();

        let result = interpret(&f, &[value.clone(), amount.clone()]).unwrap();
        prop_assert_eq!(result, Some(reference(&case, &value, &amount)));
    }

    #[test]
    fn pass_is_idempotent(case in shift_case()) {
        let mut f = case.build().unwrap();
        BitShiftFixupPass.run(&mut f);
        let once = f.clone();
        prop_assert_eq!(BitShiftFixupPass.run(&mut f), PreservedAnalyses::all());
        prop_assert_eq!(f, once);
    }

    #[test]
    fn provably_in_range_shifts_are_untouched(case in shift_case()) {
        let mut f = case.build().unwrap();
        let original = f.clone();
        let preserved = BitShiftFixupPass.run(&mut f);
        match case.amount {
            AmountShape::InRange(_) | AmountShape::Masked => {
                prop_assert!(preserved.is_all());
                prop_assert_eq!(f, original);
            }
            AmountShape::Variable | AmountShape::OutOfRange(_) => {
                prop_assert_eq!(preserved, PreservedAnalyses::cfg());
                prop_assert_eq!(f.num_instructions(), original.num_instructions() + 1);
            }
            // Depends on whether the mask survives truncation to the element width.
            AmountShape::MaskedWith(_) => {}
        }
    }

    #[test]
    fn reported_change_matches_inserted_mask(case in shift_case()) {
        let mut f = case.build().unwrap();
        let before = f.num_instructions();
        let preserved = BitShiftFixupPass.run(&mut f);
        prop_assert_eq!(preserved.is_all(), f.num_instructions() == before);
    }
}
